pub mod bn254;

/// Identifies the curve whose scalar field a serialized artifact was built
/// over. Written as a 1-byte header on persisted constraint systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CurveId {
    Bn254 = 1,
}

impl CurveId {
    /// Parse the header byte back into a curve identifier.
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(CurveId::Bn254),
            _ => None,
        }
    }
}
