use uuid::Uuid;

/// Identifier of a scene element. Minted once on creation and kept through every transform.
pub type ElementId = Uuid;

pub fn generate_id() -> ElementId {
    Uuid::new_v4()
}
