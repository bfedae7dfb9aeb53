//! Power-of-two evaluation domains for the FFT.

use plexus_ecc::fields::field::Field;
use plexus_ecc::fields::field_params::FieldParams;

use crate::error::Error;

/// A multiplicative subgroup of power-of-two order, with the generators and
/// inverses the transform needs precomputed.
#[derive(Debug, Clone)]
pub struct Domain<P: FieldParams> {
    /// Generator of the subgroup; has order `cardinality`.
    pub generator: Field<P>,
    pub generator_inv: Field<P>,
    /// A square root of `generator`, of order `2 * cardinality`. Used for
    /// coset evaluations over the doubled domain.
    pub generator_sq_rt: Field<P>,
    pub generator_sq_rt_inv: Field<P>,
    pub cardinality: usize,
    pub cardinality_inv: Field<P>,
}

impl<P: FieldParams> Domain<P> {
    /// Smallest power-of-two domain with cardinality >= `m`. Fails when the
    /// field's 2-adic subgroup cannot hold the doubled domain.
    pub fn new(m: usize) -> Result<Self, Error> {
        let cardinality = m.next_power_of_two();
        let log2_cardinality = cardinality.trailing_zeros();
        if log2_cardinality > P::TWO_ADICITY - 1 {
            return Err(Error::DomainSizeTooLarge { size: m });
        }

        let generator_sq_rt = Field::<P>::get_root_of_unity(log2_cardinality + 1);
        let generator = generator_sq_rt.sqr();

        Ok(Self {
            generator,
            generator_inv: generator.invert(),
            generator_sq_rt,
            generator_sq_rt_inv: generator_sq_rt.invert(),
            cardinality,
            cardinality_inv: Field::<P>::from(cardinality as u64).invert(),
        })
    }
}
