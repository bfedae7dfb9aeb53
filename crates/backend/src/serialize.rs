//! Binary persistence for constraint systems.
//!
//! Integers are fixed-width big-endian, slices and strings carry a 32-bit
//! length prefix, field elements are written as their raw Montgomery limbs.
//! A persisted R1CS starts with a 1-byte curve identifier. The only
//! contract on the format is that write followed by read reproduces an
//! equal structure.

use bytes::{Buf, BufMut};
use thiserror::Error;

use plexus_ecc::curves::CurveId;
use plexus_ecc::fields::field::Field;
use plexus_ecc::fields::field_params::FieldParams;

use crate::r1cs::{SolverKind, Term, R1C, R1CS};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    #[error("write buffer is full")]
    WriteBufferFull,
    #[error("not enough data in read buffer")]
    NotEnoughBytes,
    #[error("unknown enum variant {name}::{index}")]
    UnknownEnumVariant { name: &'static str, index: u8 },
    #[error("curve header mismatch: expected {expected}, got {got}")]
    CurveMismatch { expected: u8, got: u8 },
    #[error("invalid utf-8 string: {0}")]
    FromUtf8Error(#[from] std::string::FromUtf8Error),
    #[error("usize {size} is too large to serialize (max is {max})", max = u32::MAX)]
    UsizeTooLarge { size: usize },
}

/// Write a value into a byte buffer.
pub trait SerializeBytes {
    fn serialize(&self, write_buf: impl BufMut) -> Result<(), SerializationError>;
}

/// Read a value back out of a byte buffer.
pub trait DeserializeBytes {
    fn deserialize(read_buf: impl Buf) -> Result<Self, SerializationError>
    where
        Self: Sized;
}

#[inline]
fn need_space(write_buf: &impl BufMut, size: usize) -> Result<(), SerializationError> {
    if write_buf.remaining_mut() < size {
        return Err(SerializationError::WriteBufferFull);
    }
    Ok(())
}

#[inline]
fn need_data(read_buf: &impl Buf, size: usize) -> Result<(), SerializationError> {
    if read_buf.remaining() < size {
        return Err(SerializationError::NotEnoughBytes);
    }
    Ok(())
}

impl SerializeBytes for u8 {
    fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
        need_space(&write_buf, 1)?;
        write_buf.put_u8(*self);
        Ok(())
    }
}

impl DeserializeBytes for u8 {
    fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
        need_data(&read_buf, 1)?;
        Ok(read_buf.get_u8())
    }
}

impl SerializeBytes for u32 {
    fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
        need_space(&write_buf, 4)?;
        write_buf.put_u32(*self);
        Ok(())
    }
}

impl DeserializeBytes for u32 {
    fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
        need_data(&read_buf, 4)?;
        Ok(read_buf.get_u32())
    }
}

impl SerializeBytes for u64 {
    fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
        need_space(&write_buf, 8)?;
        write_buf.put_u64(*self);
        Ok(())
    }
}

impl DeserializeBytes for u64 {
    fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
        need_data(&read_buf, 8)?;
        Ok(read_buf.get_u64())
    }
}

impl SerializeBytes for usize {
    fn serialize(&self, write_buf: impl BufMut) -> Result<(), SerializationError> {
        let value: u32 = (*self)
            .try_into()
            .map_err(|_| SerializationError::UsizeTooLarge { size: *self })?;
        value.serialize(write_buf)
    }
}

impl DeserializeBytes for usize {
    fn deserialize(read_buf: impl Buf) -> Result<Self, SerializationError> {
        Ok(u32::deserialize(read_buf)? as usize)
    }
}

impl SerializeBytes for String {
    fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
        let bytes = self.as_bytes();
        bytes.len().serialize(&mut write_buf)?;
        need_space(&write_buf, bytes.len())?;
        write_buf.put_slice(bytes);
        Ok(())
    }
}

impl DeserializeBytes for String {
    fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
        let len = usize::deserialize(&mut read_buf)?;
        need_data(&read_buf, len)?;
        Ok(Self::from_utf8(read_buf.copy_to_bytes(len).to_vec())?)
    }
}

impl<T: SerializeBytes> SerializeBytes for Vec<T> {
    fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
        self.len().serialize(&mut write_buf)?;
        self.iter()
            .try_for_each(|item| item.serialize(&mut write_buf))
    }
}

impl<T: DeserializeBytes> DeserializeBytes for Vec<T> {
    fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
        let len = usize::deserialize(&mut read_buf)?;
        (0..len).map(|_| T::deserialize(&mut read_buf)).collect()
    }
}

impl<K, V> SerializeBytes for std::collections::BTreeMap<K, V>
where
    K: SerializeBytes,
    V: SerializeBytes,
{
    fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
        self.len().serialize(&mut write_buf)?;
        for (k, v) in self {
            k.serialize(&mut write_buf)?;
            v.serialize(&mut write_buf)?;
        }
        Ok(())
    }
}

impl<K, V> DeserializeBytes for std::collections::BTreeMap<K, V>
where
    K: DeserializeBytes + Ord,
    V: DeserializeBytes,
{
    fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
        let len = usize::deserialize(&mut read_buf)?;
        (0..len)
            .map(|_| {
                let k = K::deserialize(&mut read_buf)?;
                let v = V::deserialize(&mut read_buf)?;
                Ok((k, v))
            })
            .collect()
    }
}

/// Raw Montgomery limbs, each big-endian, low limb first.
impl<P: FieldParams> SerializeBytes for Field<P> {
    fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
        for limb in self.data {
            limb.serialize(&mut write_buf)?;
        }
        Ok(())
    }
}

impl<P: FieldParams> DeserializeBytes for Field<P> {
    fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
        let mut limbs = [0u64; 4];
        for limb in &mut limbs {
            *limb = u64::deserialize(&mut read_buf)?;
        }
        Ok(Field::from_raw(limbs))
    }
}

impl SerializeBytes for SolverKind {
    fn serialize(&self, write_buf: impl BufMut) -> Result<(), SerializationError> {
        let tag: u8 = match self {
            SolverKind::SingleOutput => 0,
            SolverKind::BinaryDec => 1,
        };
        tag.serialize(write_buf)
    }
}

impl DeserializeBytes for SolverKind {
    fn deserialize(read_buf: impl Buf) -> Result<Self, SerializationError> {
        match u8::deserialize(read_buf)? {
            0 => Ok(SolverKind::SingleOutput),
            1 => Ok(SolverKind::BinaryDec),
            index => Err(SerializationError::UnknownEnumVariant {
                name: "SolverKind",
                index,
            }),
        }
    }
}

impl<P: FieldParams> SerializeBytes for Term<P> {
    fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
        self.wire_id.serialize(&mut write_buf)?;
        self.coeff.serialize(&mut write_buf)
    }
}

impl<P: FieldParams> DeserializeBytes for Term<P> {
    fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
        Ok(Term {
            wire_id: u64::deserialize(&mut read_buf)?,
            coeff: Field::deserialize(&mut read_buf)?,
        })
    }
}

impl<P: FieldParams> SerializeBytes for R1C<P> {
    fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
        self.l.serialize(&mut write_buf)?;
        self.r.serialize(&mut write_buf)?;
        self.o.serialize(&mut write_buf)?;
        self.solver.serialize(&mut write_buf)
    }
}

impl<P: FieldParams> DeserializeBytes for R1C<P> {
    fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
        Ok(R1C {
            l: Vec::deserialize(&mut read_buf)?,
            r: Vec::deserialize(&mut read_buf)?,
            o: Vec::deserialize(&mut read_buf)?,
            solver: SolverKind::deserialize(&mut read_buf)?,
        })
    }
}

/// Fields in declaration order.
impl<P: FieldParams> SerializeBytes for R1CS<P> {
    fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
        self.nb_wires.serialize(&mut write_buf)?;
        self.nb_public_wires.serialize(&mut write_buf)?;
        self.nb_private_wires.serialize(&mut write_buf)?;
        self.private_wires.serialize(&mut write_buf)?;
        self.public_wires.serialize(&mut write_buf)?;
        self.wire_tags.serialize(&mut write_buf)?;
        self.nb_constraints.serialize(&mut write_buf)?;
        self.nb_co_constraints.serialize(&mut write_buf)?;
        self.constraints.serialize(&mut write_buf)
    }
}

impl<P: FieldParams> DeserializeBytes for R1CS<P> {
    fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
        Ok(R1CS {
            nb_wires: usize::deserialize(&mut read_buf)?,
            nb_public_wires: usize::deserialize(&mut read_buf)?,
            nb_private_wires: usize::deserialize(&mut read_buf)?,
            private_wires: Vec::deserialize(&mut read_buf)?,
            public_wires: Vec::deserialize(&mut read_buf)?,
            wire_tags: std::collections::BTreeMap::deserialize(&mut read_buf)?,
            nb_constraints: usize::deserialize(&mut read_buf)?,
            nb_co_constraints: usize::deserialize(&mut read_buf)?,
            constraints: Vec::deserialize(&mut read_buf)?,
        })
    }
}

impl<P: FieldParams> R1CS<P> {
    /// Dump the system, headed by the curve identifier.
    pub fn write(
        &self,
        curve: CurveId,
        mut write_buf: impl BufMut,
    ) -> Result<(), SerializationError> {
        (curve as u8).serialize(&mut write_buf)?;
        self.serialize(&mut write_buf)
    }

    /// Read a system back, verifying the curve header.
    pub fn read(curve: CurveId, mut read_buf: impl Buf) -> Result<Self, SerializationError> {
        let header = u8::deserialize(&mut read_buf)?;
        if header != curve as u8 {
            return Err(SerializationError::CurveMismatch {
                expected: curve as u8,
                got: header,
            });
        }
        Self::deserialize(&mut read_buf)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::assignment::ONE_WIRE;
    use plexus_ecc::curves::bn254::{Bn254FrParams, Fr};

    fn sample_r1cs() -> R1CS<Bn254FrParams> {
        let mut wire_tags = BTreeMap::new();
        wire_tags.insert(0u64, vec!["x".to_string()]);
        wire_tags.insert(3u64, vec!["y".to_string(), "out".to_string()]);
        R1CS {
            nb_wires: 4,
            nb_public_wires: 2,
            nb_private_wires: 1,
            private_wires: vec!["w".to_string()],
            public_wires: vec![ONE_WIRE.to_string(), "y".to_string()],
            wire_tags,
            nb_constraints: 2,
            nb_co_constraints: 1,
            constraints: vec![
                R1C {
                    l: vec![Term::new(2, Fr::from(3u64))],
                    r: vec![Term::new(0, Fr::one())],
                    o: vec![Term::new(3, Fr::one())],
                    solver: SolverKind::SingleOutput,
                },
                R1C {
                    l: vec![Term::new(0, Fr::one()), Term::new(1, -Fr::one())],
                    r: vec![],
                    o: vec![Term::new(3, Fr::from(7u64))],
                    solver: SolverKind::BinaryDec,
                },
            ],
        }
    }

    #[test]
    fn test_r1cs_round_trip() {
        let r1cs = sample_r1cs();
        let mut buf = Vec::new();
        r1cs.write(CurveId::Bn254, &mut buf).unwrap();
        let back = R1CS::<Bn254FrParams>::read(CurveId::Bn254, buf.as_slice()).unwrap();
        assert_eq!(back, r1cs);
    }

    #[test]
    fn test_curve_header_checked() {
        let r1cs = sample_r1cs();
        let mut buf = Vec::new();
        r1cs.write(CurveId::Bn254, &mut buf).unwrap();
        buf[0] = 0xff;
        let err = R1CS::<Bn254FrParams>::read(CurveId::Bn254, buf.as_slice()).unwrap_err();
        assert_eq!(
            err,
            SerializationError::CurveMismatch {
                expected: CurveId::Bn254 as u8,
                got: 0xff
            }
        );
    }

    #[test]
    fn test_truncated_input_rejected() {
        let r1cs = sample_r1cs();
        let mut buf = Vec::new();
        r1cs.write(CurveId::Bn254, &mut buf).unwrap();
        let err =
            R1CS::<Bn254FrParams>::read(CurveId::Bn254, &buf[..buf.len() - 3]).unwrap_err();
        assert_eq!(err, SerializationError::NotEnoughBytes);
    }

    #[test]
    fn test_unknown_solver_kind_rejected() {
        let mut buf = Vec::new();
        7u8.serialize(&mut buf).unwrap();
        let err = SolverKind::deserialize(buf.as_slice()).unwrap_err();
        assert_eq!(
            err,
            SerializationError::UnknownEnumVariant {
                name: "SolverKind",
                index: 7
            }
        );
    }

    #[test]
    fn test_field_round_trip_preserves_montgomery_form() {
        let x = Fr::from(123456789u64);
        let mut buf = Vec::new();
        x.serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), 32);
        let back = Fr::deserialize(buf.as_slice()).unwrap();
        assert_eq!(back, x);
        assert_eq!(back.data, x.data);
    }
}
