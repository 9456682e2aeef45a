use crate::bits::{self, BitChunkedInt};
use crate::config::CodecConfig;
use crate::metadata::{CustomMetadata, TypeMetadata};
use crate::payload::ScalarPayload;
use crate::DiaError;
use anyhow::{anyhow, Result};
use bigdecimal::BigDecimal;
use dia_types::DiaType;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;
use std::io::{Read, Write};

/* Bool: the Custom flag is the value. */
impl ScalarPayload for bool {
    fn is_default(&self) -> bool {
        !*self
    }
    fn default_payload() -> Self {
        false
    }
    fn write_payload<W: Write>(&self, _: &mut W, _: DiaType, _: &CodecConfig) -> Result<usize> {
        Ok(0)
    }
    fn read_payload<R: Read>(_: &mut R, _: &TypeMetadata) -> Result<Self> {
        Ok(true)
    }
}

/* Int: minimal two's-complement, little-endian, as a chunk sequence. */
impl ScalarPayload for BigInt {
    fn is_default(&self) -> bool {
        self.is_zero()
    }
    fn default_payload() -> Self {
        BigInt::zero()
    }
    fn write_payload<W: Write>(
        &self,
        w: &mut W,
        _: DiaType,
        config: &CodecConfig,
    ) -> Result<usize> {
        bits::write_chunked(w, &self.to_signed_bytes_le(), config.chunk_len)
    }
    fn read_payload<R: Read>(r: &mut R, _: &TypeMetadata) -> Result<Self> {
        let bytes = bits::read_chunked(r)?;
        Ok(BigInt::from_signed_bytes_le(&bytes))
    }
}

/// CustomMetadata bit D1.
pub(crate) const SIGNIFICAND_NEGATIVE_BIT: u8 = 0;
/// CustomMetadata bit D2.
pub(crate) const SCALE_NEGATIVE_BIT: u8 = 1;

/// Decimal: `significand * 10^(-scale)`.
///
/// ```text
/// header custom metadata:  D1 = significand < 0, D2 = scale < 0
/// scale magnitude:         BitChunkedInt
/// significand magnitude:   chunk sequence, unsigned little-endian
/// ```
impl ScalarPayload for BigDecimal {
    fn is_default(&self) -> bool {
        let (significand, scale) = self.as_bigint_and_exponent();
        significand.is_zero() && scale == 0
    }
    fn default_payload() -> Self {
        BigDecimal::zero()
    }
    fn custom_metadata(&self) -> Vec<CustomMetadata> {
        let (significand, scale) = self.as_bigint_and_exponent();
        let cm = CustomMetadata::default()
            .with_bit(SIGNIFICAND_NEGATIVE_BIT, significand.sign() == Sign::Minus)
            .with_bit(SCALE_NEGATIVE_BIT, scale < 0);
        vec![cm]
    }
    fn write_payload<W: Write>(
        &self,
        w: &mut W,
        _: DiaType,
        config: &CodecConfig,
    ) -> Result<usize> {
        let (significand, scale) = self.as_bigint_and_exponent();
        let mut w_len = 0;
        w_len += BitChunkedInt::from_u64(scale.unsigned_abs()).write_to(w)?;
        w_len += bits::write_chunked(w, &significand.magnitude().to_bytes_le(), config.chunk_len)?;
        Ok(w_len)
    }
    fn read_payload<R: Read>(r: &mut R, meta: &TypeMetadata) -> Result<Self> {
        let cm = meta.custom_metadata().first().copied().ok_or(anyhow!(
            DiaError::MalformedPayload(DiaType::Decimal, String::from("missing sign metadata"))
        ))?;

        let scale_mag = i128::from(BitChunkedInt::read_from(r)?.to_u64()?);
        let scale = if cm.is_bit_set(SCALE_NEGATIVE_BIT) {
            -scale_mag
        } else {
            scale_mag
        };
        let scale = i64::try_from(scale).map_err(|_| {
            anyhow!(DiaError::MalformedPayload(
                DiaType::Decimal,
                format!("scale {scale} exceeds 64 bits")
            ))
        })?;

        let significand_mag = BigUint::from_bytes_le(&bits::read_chunked(r)?);
        let sign = if cm.is_bit_set(SIGNIFICAND_NEGATIVE_BIT) {
            Sign::Minus
        } else {
            Sign::Plus
        };
        let significand = BigInt::from_biguint(sign, significand_mag);

        Ok(BigDecimal::new(significand, scale))
    }
}
