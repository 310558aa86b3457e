use uuid::Uuid;

/// Source of the UUIDs stamped on generated OSCAL objects.
pub trait IdGenerator {
    fn next_id(&mut self) -> Uuid;
}

/// Random version 4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Predictable UUIDs counting up from 1.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u128,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Uuid {
        self.next += 1;
        Uuid::from_u128(self.next)
    }
}
