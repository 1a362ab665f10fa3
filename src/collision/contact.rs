use glam::Vec2;

use crate::utils::allocator::BodyId;

/// Contact record for one tested body pair during one tick.
///
/// Lives on the stack for a single detect + resolve call and is never cached,
/// so there is no warm starting between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Manifold {
    pub body_a: BodyId,
    pub body_b: BodyId,
    /// Unit normal pointing from A toward B.
    pub normal: Vec2,
    pub penetration: f32,
    /// 0 (no contact) or 1; multi-point manifolds are not generated.
    pub contact_count: u32,
}

impl Manifold {
    pub fn new(body_a: BodyId, body_b: BodyId) -> Self {
        Self {
            body_a,
            body_b,
            normal: Vec2::ZERO,
            penetration: 0.0,
            contact_count: 0,
        }
    }

    /// Records a single contact.
    pub fn set_contact(&mut self, normal: Vec2, penetration: f32) {
        self.normal = normal;
        self.penetration = penetration.max(0.0);
        self.contact_count = 1;
    }

    pub fn clear(&mut self) {
        self.normal = Vec2::ZERO;
        self.penetration = 0.0;
        self.contact_count = 0;
    }

    pub fn has_contact(&self) -> bool {
        self.contact_count > 0
    }

    /// The same contact seen from B: bodies swapped, normal negated.
    pub fn reversed(&self) -> Self {
        Self {
            body_a: self.body_b,
            body_b: self.body_a,
            normal: -self.normal,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_swaps_bodies_and_normal() {
        let mut manifold = Manifold::new(BodyId::new(0, 0), BodyId::new(1, 0));
        manifold.set_contact(Vec2::X, 0.5);

        let reversed = manifold.reversed();
        assert_eq!(reversed.body_a, manifold.body_b);
        assert_eq!(reversed.normal, -Vec2::X);
        assert_eq!(reversed.penetration, 0.5);
        assert_eq!(reversed.contact_count, 1);
        assert!(reversed.has_contact());

        manifold.clear();
        assert!(!manifold.has_contact());
    }

    #[test]
    fn negative_penetration_is_clamped() {
        let mut manifold = Manifold::new(BodyId::default(), BodyId::default());
        manifold.set_contact(Vec2::Y, -1.0);
        assert_eq!(manifold.penetration, 0.0);
    }
}
