//! Hand-off of the previous frame into the next frame's read buffer.

use crate::coords::ColorRgba;

use super::backend::GpuBackend;
use super::config::TransferStrategy;
use super::roles::Slot;
use super::texture_pair::TexturePair;

/// Establishes the base state of a freshly allocated pair.
///
/// Both slots are cleared to `color`. The inactive one is the first read; the
/// current one keeps `color` wherever the kernel does not reach (the last
/// row or column of an odd-sized texture).
pub fn seed_new_pair<B: GpuBackend>(backend: &mut B, pair: &TexturePair<B::Texture>, color: ColorRgba) {
    for slot in [Slot::A, Slot::B] {
        backend.clear_texture(pair.get(slot), color);
    }
}

/// Runs before the evolution dispatch of every tick.
///
/// Ping-pong needs nothing here; the legacy copy strategy blits the whole
/// inactive texture into current first.
pub fn before_evolve<B: GpuBackend>(
    backend: &mut B,
    frame: &mut B::Frame,
    strategy: TransferStrategy,
    inactive: &B::Texture,
    current: &B::Texture,
) {
    match strategy {
        TransferStrategy::PingPong => {}
        TransferStrategy::Copy => backend.copy_texture(frame, inactive, current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::TextureExtent;
    use crate::sim::testing::{CpuBackend, CpuTexture};

    fn pair(backend: &mut CpuBackend) -> TexturePair<CpuTexture> {
        TexturePair::allocate(backend, TextureExtent::new(4, 4), 1, 0).unwrap()
    }

    #[test]
    fn new_pair_clears_both_slots() {
        let mut backend = CpuBackend::new();
        let pair = pair(&mut backend);
        assert_eq!(pair.get(Slot::A).texel(3, 3), [0, 0, 0, 0]);

        seed_new_pair(&mut backend, &pair, ColorRgba::black());

        for slot in [Slot::A, Slot::B] {
            assert!(pair.get(slot).snapshot().iter().all(|&t| t == [0, 0, 0, 255]));
        }
        assert_eq!(backend.clears.len(), 2);
    }

    #[test]
    fn copy_runs_on_present_only() {
        let mut backend = CpuBackend::new();
        let pair = pair(&mut backend);
        backend.clear_texture(pair.get(Slot::B), ColorRgba::white());

        let mut frame = backend.begin_frame().unwrap();
        before_evolve(
            &mut backend,
            &mut frame,
            TransferStrategy::Copy,
            pair.get(Slot::B),
            pair.get(Slot::A),
        );
        assert_eq!(pair.get(Slot::A).texel(0, 0), [0, 0, 0, 0]);

        backend.present(frame);
        assert_eq!(pair.get(Slot::A).snapshot(), pair.get(Slot::B).snapshot());
        assert_eq!(backend.copies, 1);
    }

    #[test]
    fn ping_pong_records_nothing() {
        let mut backend = CpuBackend::new();
        let pair = pair(&mut backend);
        let mut frame = backend.begin_frame().unwrap();
        before_evolve(
            &mut backend,
            &mut frame,
            TransferStrategy::PingPong,
            pair.get(Slot::B),
            pair.get(Slot::A),
        );
        backend.present(frame);
        assert_eq!(backend.copies, 0);
    }
}
