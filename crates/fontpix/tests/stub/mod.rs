//! Instrumented engine for exercising the handle and locking logic
//!
//! Glyphs are synthetic: a 3x2 bitmap whose pixels encode the character code
//! and the face id, so a result produced for the wrong call is easy to spot.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use fontpix_core::{
    error::ErrorCode,
    fixed::{F26Dot6, RawGlyphMetrics},
    traits::{Engine, EngineResult},
    types::{BitmapDescriptor, GlyphSlot, LoadFlags, PixelMode},
};

pub const GLYPH_WIDTH: u32 = 3;
pub const GLYPH_ROWS: u32 = 2;
/// Gray rows are padded to this many bytes
pub const GRAY_PITCH: i32 = 4;

/// Character code that fails with a code the engine can describe
pub const CODE_INVALID_GLYPH: u32 = 0;
/// Character code that fails with a code the engine has no text for
pub const CODE_MYSTERY: u32 = 1;
/// Character code that renders into an LCD bitmap the transcoder rejects
pub const CODE_LCD: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    LoadStart(usize),
    SlotReleased(usize),
}

/// Counters shared by every handle of one engine
#[derive(Default)]
pub struct Stats {
    pub libraries_finalized: AtomicUsize,
    pub faces_finalized: AtomicUsize,
    pub loads_in_flight: AtomicUsize,
    pub max_loads_in_flight: AtomicUsize,
    /// Loads that began while the same face still had a live slot
    pub slot_violations: AtomicUsize,
    pub events: Mutex<Vec<Event>>,
    pub flags: Mutex<Vec<LoadFlags>>,
}

impl Stats {
    pub fn events_for(&self, face: usize) -> Vec<Event> {
        self.events
            .lock()
            .iter()
            .copied()
            .filter(|e| matches!(e, Event::LoadStart(id) | Event::SlotReleased(id) if *id == face))
            .collect()
    }
}

pub struct StubEngine {
    pub stats: Arc<Stats>,
    next_face: AtomicUsize,
    color: bool,
    load_delay: Duration,
    /// Hold each load until another face is loading too (or time runs out)
    wait_for_peer: bool,
}

impl StubEngine {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(Stats::default()),
            next_face: AtomicUsize::new(0),
            color: false,
            load_delay: Duration::ZERO,
            wait_for_peer: false,
        }
    }

    pub fn with_color(mut self) -> Self {
        self.color = true;
        self
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    pub fn waiting_for_peer(mut self) -> Self {
        self.wait_for_peer = true;
        self
    }
}

pub struct StubLibrary;

pub struct StubFace {
    pub id: usize,
    pub char_height: F26Dot6,
    pub dpi: u32,
    data: Vec<u8>,
    slot: Vec<u8>,
    pitch: i32,
    mode: PixelMode,
    busy: Arc<AtomicBool>,
}

/// Gray value the stub writes for a character on a face
pub fn shade(code: u32, face: usize) -> u8 {
    (code as u8).wrapping_add(face as u8 * 16)
}

impl Engine for StubEngine {
    type Library = StubLibrary;
    type Face = StubFace;

    fn name(&self) -> &'static str {
        "stub"
    }

    fn initialize(&self) -> EngineResult<StubLibrary> {
        Ok(StubLibrary)
    }

    fn finalize(&self, _library: StubLibrary) -> EngineResult<()> {
        self.stats.libraries_finalized.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn load_face(
        &self,
        _library: &mut StubLibrary,
        data: &[u8],
        _index: u32,
    ) -> EngineResult<StubFace> {
        if data.is_empty() {
            return Err(ErrorCode(0x02));
        }
        Ok(StubFace {
            id: self.next_face.fetch_add(1, Ordering::SeqCst),
            char_height: F26Dot6::ZERO,
            dpi: 0,
            data: data.to_vec(),
            slot: Vec::new(),
            pitch: 0,
            mode: PixelMode::Gray,
            busy: Arc::new(AtomicBool::new(false)),
        })
    }

    fn set_char_size(&self, face: &mut StubFace, height: F26Dot6, dpi: u32) -> EngineResult<()> {
        face.char_height = height;
        face.dpi = dpi;
        Ok(())
    }

    fn has_color(&self, _face: &StubFace) -> bool {
        self.color
    }

    fn load_glyph<'f>(
        &self,
        face: &'f mut StubFace,
        code: u32,
        flags: LoadFlags,
    ) -> EngineResult<GlyphSlot<'f>> {
        self.stats.flags.lock().push(flags);
        match code {
            CODE_INVALID_GLYPH => return Err(ErrorCode(0x10)),
            CODE_MYSTERY => return Err(ErrorCode(0x99)),
            _ => {},
        }

        if face.busy.swap(true, Ordering::SeqCst) {
            self.stats.slot_violations.fetch_add(1, Ordering::SeqCst);
        }
        self.stats.events.lock().push(Event::LoadStart(face.id));

        let in_flight = self.stats.loads_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats
            .max_loads_in_flight
            .fetch_max(in_flight, Ordering::SeqCst);

        if self.wait_for_peer {
            let deadline = Instant::now() + Duration::from_secs(5);
            while self.stats.loads_in_flight.load(Ordering::SeqCst) < 2
                && Instant::now() < deadline
            {
                thread::sleep(Duration::from_millis(1));
            }
        }
        if !self.load_delay.is_zero() {
            thread::sleep(self.load_delay);
        }

        let value = shade(code, face.id);
        if code == CODE_LCD {
            face.mode = PixelMode::from_tag(5);
            face.pitch = GLYPH_WIDTH as i32 * 3;
            face.slot = vec![value; (GLYPH_WIDTH * 3 * GLYPH_ROWS) as usize];
        } else if flags.contains(LoadFlags::COLOR) {
            face.mode = PixelMode::Bgra;
            face.pitch = GLYPH_WIDTH as i32 * 4;
            face.slot = [value, 0x20, 0x40, 0x80].repeat((GLYPH_WIDTH * GLYPH_ROWS) as usize);
        } else if flags.contains(LoadFlags::MONOCHROME) {
            face.mode = PixelMode::Mono;
            face.pitch = 2;
            face.slot = vec![0b1010_0000, 0x00, 0b0100_0000, 0x00];
        } else {
            face.mode = PixelMode::Gray;
            face.pitch = GRAY_PITCH;
            face.slot = vec![value; (GRAY_PITCH as u32 * GLYPH_ROWS) as usize];
        }

        self.stats.loads_in_flight.fetch_sub(1, Ordering::SeqCst);

        Ok(GlyphSlot {
            bitmap: BitmapDescriptor {
                width: GLYPH_WIDTH,
                rows: GLYPH_ROWS,
                pitch: face.pitch,
                pixel_mode: face.mode,
                buffer: &face.slot,
            },
            metrics: RawGlyphMetrics {
                width: F26Dot6::from_int(GLYPH_WIDTH as i32),
                height: F26Dot6::from_int(GLYPH_ROWS as i32),
                hori_bearing_x: F26Dot6::from_raw(-128),
                hori_bearing_y: F26Dot6::from_raw(2048),
                hori_advance: face.char_height,
                vert_bearing_x: F26Dot6::from_int(-1),
                vert_bearing_y: F26Dot6::ZERO,
                vert_advance: F26Dot6::from_int(face.dpi as i32),
            },
        })
    }

    fn release_slot(&self, face: &mut StubFace) {
        self.stats.events.lock().push(Event::SlotReleased(face.id));
        face.busy.store(false, Ordering::SeqCst);
    }

    fn finalize_face(&self, _face: StubFace) -> EngineResult<()> {
        self.stats.faces_finalized.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn error_string(&self, code: ErrorCode) -> Option<&'static str> {
        match code.raw() {
            0x02 => Some("unknown file format"),
            0x10 => Some("invalid glyph index"),
            _ => None,
        }
    }
}
