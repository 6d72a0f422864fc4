//! CPU stand-in for the GPU backend.
//!
//! Textures are plain `Vec<[u8; 4]>` buffers. Work recorded into a frame runs
//! on `present`, so a frame that is dropped has no effect, as on the GPU. The
//! evolution kernel is replaced by a deterministic one that inverts RGB over
//! each 2×2 block and counts how often each work-item runs.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::coords::{ColorRgba, TextureExtent};
use crate::render::QuadGeometry;

use super::backend::GpuBackend;
use super::evolve::DispatchGrid;
use super::SimError;

pub type Texels = Vec<[u8; 4]>;

/// Decrements the shared live counter when the texture goes away.
struct LiveToken(Rc<Cell<usize>>);

impl LiveToken {
    fn new(counter: &Rc<Cell<usize>>) -> Self {
        counter.set(counter.get() + 1);
        Self(Rc::clone(counter))
    }
}

impl Drop for LiveToken {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

pub struct CpuTexture {
    id: u64,
    extent: TextureExtent,
    texels: Rc<RefCell<Texels>>,
    _live: LiveToken,
}

impl CpuTexture {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn snapshot(&self) -> Texels {
        self.texels.borrow().clone()
    }

    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        self.texels.borrow()[(y * self.extent.width + x) as usize]
    }
}

enum Command {
    Copy {
        src: Rc<RefCell<Texels>>,
        dst: Rc<RefCell<Texels>>,
    },
    Evolve {
        read_id: u64,
        write_id: u64,
        read: Rc<RefCell<Texels>>,
        write: Rc<RefCell<Texels>>,
        extent: TextureExtent,
        seed: f32,
        grid: DispatchGrid,
    },
    Draw {
        texture_id: u64,
        geometry: QuadGeometry,
        clear: ColorRgba,
    },
}

pub struct CpuFrame {
    commands: Vec<Command>,
    extent: Option<TextureExtent>,
}

/// What `begin_frame` returns next.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Drawable {
    Available,
    Missing,
    DeviceLost,
}

#[derive(Debug, Clone)]
pub struct DispatchRecord {
    pub read_id: u64,
    pub write_id: u64,
    pub seed: f32,
    pub grid: DispatchGrid,
    /// Read texture as the kernel saw it.
    pub read_before: Texels,
    /// Write texture right before the kernel ran.
    pub write_before: Texels,
    pub write_after: Texels,
    /// Row-major hit count per work-item.
    pub visits: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct DrawRecord {
    pub texture_id: u64,
    pub geometry: QuadGeometry,
    pub clear: ColorRgba,
}

pub struct CpuBackend {
    pub max_dimension: u32,
    next_id: u64,
    live: Rc<Cell<usize>>,
    creations_left: Option<usize>,
    drawables: VecDeque<Drawable>,
    /// Size reported for acquired drawables; `None` leaves it untracked.
    pub drawable_extent: Option<TextureExtent>,
    pub clears: Vec<(u64, ColorRgba)>,
    pub copies: usize,
    pub dispatches: Vec<DispatchRecord>,
    pub draws: Vec<DrawRecord>,
    pub presents: usize,
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuBackend {
    pub fn new() -> Self {
        Self {
            max_dimension: 8192,
            next_id: 0,
            live: Rc::new(Cell::new(0)),
            creations_left: None,
            drawables: VecDeque::new(),
            drawable_extent: None,
            clears: Vec::new(),
            copies: 0,
            dispatches: Vec::new(),
            draws: Vec::new(),
            presents: 0,
        }
    }

    /// The next `n` creations succeed; every one after that fails.
    pub fn fail_allocation_after(&mut self, n: usize) {
        self.creations_left = Some(n);
    }

    pub fn allow_allocation(&mut self) {
        self.creations_left = None;
    }

    /// Queues `begin_frame` results; once drained, drawables are available.
    pub fn script_drawables(&mut self, script: impl IntoIterator<Item = Drawable>) {
        self.drawables.extend(script);
    }

    pub fn live_textures(&self) -> usize {
        self.live.get()
    }

    fn run(&mut self, command: Command) {
        match command {
            Command::Copy { src, dst } => {
                let data = src.borrow().clone();
                dst.borrow_mut().copy_from_slice(&data);
                self.copies += 1;
            }
            Command::Evolve {
                read_id,
                write_id,
                read,
                write,
                extent,
                seed,
                grid,
            } => {
                let read_before = read.borrow().clone();
                let write_before = write.borrow().clone();
                let visits = invert_blocks(&read_before, &mut write.borrow_mut(), extent, grid);
                self.dispatches.push(DispatchRecord {
                    read_id,
                    write_id,
                    seed,
                    grid,
                    read_before,
                    write_before,
                    write_after: write.borrow().clone(),
                    visits,
                });
            }
            Command::Draw {
                texture_id,
                geometry,
                clear,
            } => self.draws.push(DrawRecord {
                texture_id,
                geometry,
                clear,
            }),
        }
    }
}

/// Mirrors the kernel's indexing: every launched invocation is bounds-checked
/// against `extent / 2` and the survivors write their 2×2 block.
fn invert_blocks(read: &Texels, write: &mut Texels, extent: TextureExtent, grid: DispatchGrid) -> Vec<u32> {
    let half = [extent.width / 2, extent.height / 2];
    let mut visits = vec![0u32; (half[0] * half[1]) as usize];
    let [lx, ly] = grid.launched();

    for gy in 0..ly {
        for gx in 0..lx {
            if gx >= half[0] || gy >= half[1] {
                continue;
            }
            visits[(gy * half[0] + gx) as usize] += 1;
            for (bx, by) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                let i = ((gy * 2 + by) * extent.width + gx * 2 + bx) as usize;
                let [r, g, b, a] = read[i];
                write[i] = [255 - r, 255 - g, 255 - b, a];
            }
        }
    }
    visits
}

impl GpuBackend for CpuBackend {
    type Texture = CpuTexture;
    type Frame = CpuFrame;

    fn max_texture_dimension(&self) -> u32 {
        self.max_dimension
    }

    fn create_texture(
        &mut self,
        extent: TextureExtent,
        _label: &'static str,
    ) -> Result<CpuTexture, SimError> {
        if let Some(left) = self.creations_left.as_mut() {
            if *left == 0 {
                return Err(SimError::allocation(extent.width, extent.height, "mock out of memory"));
            }
            *left -= 1;
        }

        self.next_id += 1;
        Ok(CpuTexture {
            id: self.next_id,
            extent,
            texels: Rc::new(RefCell::new(vec![[0; 4]; (extent.width * extent.height) as usize])),
            _live: LiveToken::new(&self.live),
        })
    }

    fn texture_extent(&self, texture: &CpuTexture) -> TextureExtent {
        texture.extent
    }

    fn clear_texture(&mut self, texture: &CpuTexture, color: ColorRgba) {
        texture.texels.borrow_mut().fill(color.to_rgba8());
        self.clears.push((texture.id, color));
    }

    fn begin_frame(&mut self) -> Result<CpuFrame, SimError> {
        match self.drawables.pop_front().unwrap_or(Drawable::Available) {
            Drawable::Available => Ok(CpuFrame {
                commands: Vec::new(),
                extent: self.drawable_extent,
            }),
            Drawable::Missing => Err(SimError::NoDrawable),
            Drawable::DeviceLost => Err(SimError::DeviceFatal("mock device lost".into())),
        }
    }

    fn frame_extent(&self, frame: &CpuFrame) -> Option<TextureExtent> {
        frame.extent
    }

    fn copy_texture(&mut self, frame: &mut CpuFrame, src: &CpuTexture, dst: &CpuTexture) {
        assert_eq!(src.extent, dst.extent);
        frame.commands.push(Command::Copy {
            src: Rc::clone(&src.texels),
            dst: Rc::clone(&dst.texels),
        });
    }

    fn dispatch_evolve(
        &mut self,
        frame: &mut CpuFrame,
        read: &CpuTexture,
        write: &CpuTexture,
        seed: f32,
        grid: DispatchGrid,
    ) {
        assert_ne!(read.id, write.id, "evolve must not read and write the same texture");
        frame.commands.push(Command::Evolve {
            read_id: read.id,
            write_id: write.id,
            read: Rc::clone(&read.texels),
            write: Rc::clone(&write.texels),
            extent: write.extent,
            seed,
            grid,
        });
    }

    fn draw_quad(
        &mut self,
        frame: &mut CpuFrame,
        texture: &CpuTexture,
        geometry: &QuadGeometry,
        clear: ColorRgba,
    ) {
        frame.commands.push(Command::Draw {
            texture_id: texture.id,
            geometry: *geometry,
            clear,
        });
    }

    fn present(&mut self, frame: CpuFrame) {
        for command in frame.commands {
            self.run(command);
        }
        self.presents += 1;
    }
}
