/// One of the two textures of a pair.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    #[inline]
    pub const fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
        }
    }
}

/// Current/inactive assignment over a texture pair.
///
/// Only the current slot is stored; inactive is always its complement, so the
/// two roles can never alias. Swapping exchanges tags and moves no data.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BufferRoles {
    current: Slot,
}

impl BufferRoles {
    /// `current = A (0)`, `inactive = B (1)`.
    pub const fn initial() -> Self {
        Self { current: Slot::A }
    }

    #[inline]
    pub const fn current(self) -> Slot {
        self.current
    }

    #[inline]
    pub const fn inactive(self) -> Slot {
        self.current.other()
    }

    #[inline]
    pub fn swap(&mut self) {
        self.current = self.current.other();
    }
}

impl Default for BufferRoles {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_assignment() {
        let r = BufferRoles::initial();
        assert_eq!(r.current().index(), 0);
        assert_eq!(r.inactive().index(), 1);
    }

    #[test]
    fn roles_never_alias() {
        let mut r = BufferRoles::initial();
        for _ in 0..7 {
            assert_ne!(r.current(), r.inactive());
            assert!(r.current().index() < 2 && r.inactive().index() < 2);
            r.swap();
        }
    }

    #[test]
    fn current_tracks_parity() {
        let mut r = BufferRoles::initial();
        for n in 1..=10usize {
            r.swap();
            assert_eq!(r.current().index(), n % 2);
        }
    }
}
