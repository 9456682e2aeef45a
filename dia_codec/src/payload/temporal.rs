use crate::bits::{self, BitChunkedInt};
use crate::config::CodecConfig;
use crate::metadata::TypeMetadata;
use crate::payload::ScalarPayload;
use crate::{io_utils, DiaError};
use anyhow::{anyhow, Result};
use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike,
};
use dia_types::DiaType;
use std::io::{Read, Write};

/* Duration: exactly 8 bytes of signed little-endian nanoseconds, as a chunk sequence. */

const DURATION_LEN: usize = 8;

impl ScalarPayload for TimeDelta {
    fn is_default(&self) -> bool {
        *self == TimeDelta::zero()
    }
    fn default_payload() -> Self {
        TimeDelta::zero()
    }
    fn write_payload<W: Write>(
        &self,
        w: &mut W,
        dia_type: DiaType,
        config: &CodecConfig,
    ) -> Result<usize> {
        let nanos = self.num_nanoseconds().ok_or(anyhow!(DiaError::Unencodable(
            dia_type,
            format!("{self} exceeds 64-bit nanoseconds")
        )))?;
        bits::write_chunked(w, &nanos.to_le_bytes(), config.chunk_len)
    }
    fn read_payload<R: Read>(r: &mut R, _: &TypeMetadata) -> Result<Self> {
        let bytes = bits::read_chunked(r)?;
        let nanos = <[u8; DURATION_LEN]>::try_from(bytes.as_slice()).map_err(|_| {
            anyhow!(DiaError::MalformedPayload(
                DiaType::Duration,
                format!("expected {DURATION_LEN} bytes, found {}", bytes.len())
            ))
        })?;
        Ok(TimeDelta::nanoseconds(i64::from_le_bytes(nanos)))
    }
}

/*
Timestamp: 72 packed bits, little-endian, then the year as a BitChunkedInt.

    bits  0..11   offset from UTC in minutes, plus OFFSET_BIAS
    bits 11..58   time of day in 100 ns ticks
    bits 58..63   day of month
    bits 63..72   month

Date and time are the local wall-clock values at that offset.
Writing truncates to whole ticks.
*/

const PACKED_LEN: usize = 9;
const OFFSET_BITS: u32 = 11;
const TICKS_BITS: u32 = 47;
const DAY_BITS: u32 = 5;
const TICKS_SHIFT: u32 = OFFSET_BITS;
const DAY_SHIFT: u32 = TICKS_SHIFT + TICKS_BITS;
const MONTH_SHIFT: u32 = DAY_SHIFT + DAY_BITS;

const OFFSET_BIAS: i32 = 1 << (OFFSET_BITS - 1);
const NANOS_PER_TICK: u32 = 100;
const TICKS_PER_SECOND: u64 = 10_000_000;
const SECONDS_PER_DAY: u64 = 86_400;

fn mask(bits: u32) -> u128 {
    (1 << bits) - 1
}

fn malformed(reason: String) -> anyhow::Error {
    anyhow!(DiaError::MalformedPayload(DiaType::Timestamp, reason))
}

impl ScalarPayload for DateTime<FixedOffset> {
    /// The Unix epoch at UTC.
    fn is_default(&self) -> bool {
        *self == Self::default_payload() && self.offset().local_minus_utc() == 0
    }
    fn default_payload() -> Self {
        DateTime::<FixedOffset>::default()
    }

    fn write_payload<W: Write>(
        &self,
        w: &mut W,
        dia_type: DiaType,
        _: &CodecConfig,
    ) -> Result<usize> {
        let unencodable = |reason: String| anyhow!(DiaError::Unencodable(dia_type, reason));

        let offset_secs = self.offset().local_minus_utc();
        if offset_secs % 60 != 0 {
            return Err(unencodable(format!(
                "offset of {offset_secs}s is not a whole number of minutes"
            )));
        }
        let biased_offset = offset_secs / 60 + OFFSET_BIAS;
        if !(0..(1 << OFFSET_BITS)).contains(&biased_offset) {
            return Err(unencodable(format!(
                "offset of {} minutes is out of range",
                offset_secs / 60
            )));
        }

        let local = self.naive_local();
        let year = u64::try_from(local.year())
            .map_err(|_| unencodable(format!("year {} is negative", local.year())))?;
        let nanos = local.nanosecond();
        if nanos >= 1_000_000_000 {
            return Err(unencodable(String::from("leap second")));
        }
        let ticks = u64::from(local.num_seconds_from_midnight()) * TICKS_PER_SECOND
            + u64::from(nanos / NANOS_PER_TICK);

        let packed = biased_offset as u128
            | (ticks as u128) << TICKS_SHIFT
            | (local.day() as u128) << DAY_SHIFT
            | (local.month() as u128) << MONTH_SHIFT;
        w.write_all(&packed.to_le_bytes()[..PACKED_LEN])?;

        let w_len = PACKED_LEN + BitChunkedInt::from_u64(year).write_to(w)?;
        Ok(w_len)
    }

    fn read_payload<R: Read>(r: &mut R, _: &TypeMetadata) -> Result<Self> {
        let packed_bytes = io_utils::read_array::<PACKED_LEN>(r, "a timestamp")?;
        let mut le = [0u8; 16];
        le[..PACKED_LEN].copy_from_slice(&packed_bytes);
        let packed = u128::from_le_bytes(le);

        let biased_offset = (packed & mask(OFFSET_BITS)) as i32;
        let ticks = ((packed >> TICKS_SHIFT) & mask(TICKS_BITS)) as u64;
        let day = ((packed >> DAY_SHIFT) & mask(DAY_BITS)) as u32;
        let month = (packed >> MONTH_SHIFT) as u32;

        let year = BitChunkedInt::read_from(r)?.to_u64()?;
        let year = i32::try_from(year).map_err(|_| malformed(format!("year {year}")))?;

        let offset_mins = biased_offset - OFFSET_BIAS;
        let offset = FixedOffset::east_opt(offset_mins * 60)
            .ok_or_else(|| malformed(format!("offset of {offset_mins} minutes")))?;
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| malformed(format!("date {year}-{month}-{day}")))?;
        let secs = ticks / TICKS_PER_SECOND;
        if secs >= SECONDS_PER_DAY {
            return Err(malformed(format!("{ticks} ticks exceed one day")));
        }
        let nanos = (ticks % TICKS_PER_SECOND) as u32 * NANOS_PER_TICK;
        let time = NaiveTime::from_num_seconds_from_midnight_opt(secs as u32, nanos)
            .ok_or_else(|| malformed(format!("time of {ticks} ticks")))?;

        offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .ok_or_else(|| malformed(format!("{date} {time} at {offset}")))
    }
}
