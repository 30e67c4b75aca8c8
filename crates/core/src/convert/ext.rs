//! Codecs for the database's MessagePack extension types
//!
//! - UUID (ext type 2): 16 raw bytes, big-endian
//! - Decimal (ext type 1): the scale as a MessagePack integer followed by
//!   packed BCD digits; the final nibble carries the sign

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::value::{WireValue, DECIMAL_EXT_TYPE, UUID_EXT_TYPE};

const UUID_LEN: usize = 16;

const SIGN_PLUS: u8 = 0x0c;
const SIGN_MINUS: u8 = 0x0d;

// ============================================================================
// UUID
// ============================================================================

/// Encode a UUID as a wire extension value.
pub fn encode_uuid(id: &Uuid) -> WireValue {
    WireValue::Ext(UUID_EXT_TYPE, id.as_bytes().to_vec())
}

/// Decode a UUID extension value.
pub fn decode_uuid(value: &WireValue) -> Result<Uuid> {
    let data = ext_payload(value, UUID_EXT_TYPE)?;
    if data.len() != UUID_LEN {
        return Err(Error::conversion(format!(
            "UUID payload must be {} bytes, got {}",
            UUID_LEN,
            data.len()
        )));
    }
    Uuid::from_slice(data).map_err(|e| Error::conversion(format!("invalid UUID: {e}")))
}

// ============================================================================
// Decimal
// ============================================================================

/// Encode a decimal as a wire extension value.
pub fn encode_decimal(value: &Decimal) -> WireValue {
    let mantissa = value.mantissa();
    let digits = mantissa.unsigned_abs().to_string();

    // digits plus the sign nibble must fill whole bytes
    let mut nibbles: Vec<u8> = Vec::with_capacity(digits.len() + 2);
    if digits.len() % 2 == 0 {
        nibbles.push(0);
    }
    nibbles.extend(digits.bytes().map(|b| b - b'0'));
    nibbles.push(if mantissa < 0 { SIGN_MINUS } else { SIGN_PLUS });

    let mut data = Vec::with_capacity(1 + nibbles.len() / 2);
    // rust_decimal scales never exceed 28, so a positive fixint always fits
    data.push(value.scale() as u8);
    data.extend(nibbles.chunks(2).map(|pair| (pair[0] << 4) | pair[1]));
    WireValue::Ext(DECIMAL_EXT_TYPE, data)
}

/// Decode a decimal extension value.
pub fn decode_decimal(value: &WireValue) -> Result<Decimal> {
    let data = ext_payload(value, DECIMAL_EXT_TYPE)?;
    let (scale, packed) = read_scale(data)?;
    if packed.is_empty() {
        return Err(Error::conversion("decimal payload has no digits"));
    }

    let mut nibbles: Vec<u8> = packed.iter().flat_map(|b| [b >> 4, b & 0x0f]).collect();
    let negative = match nibbles.pop() {
        Some(0x0b) | Some(0x0d) => true,
        Some(0x0a) | Some(0x0c) | Some(0x0e) | Some(0x0f) => false,
        other => {
            return Err(Error::conversion(format!(
                "invalid decimal sign nibble: {:?}",
                other
            )))
        }
    };

    let mut mantissa: i128 = 0;
    for digit in nibbles {
        if digit > 9 {
            return Err(Error::conversion(format!("invalid decimal digit nibble: {digit}")));
        }
        mantissa = mantissa
            .checked_mul(10)
            .and_then(|m| m.checked_add(i128::from(digit)))
            .ok_or_else(|| Error::conversion("decimal mantissa overflow"))?;
    }
    if negative {
        mantissa = -mantissa;
    }

    // a negative scale multiplies the mantissa
    let (mantissa, scale) = if scale < 0 {
        let exponent = u32::try_from(-scale)
            .map_err(|_| Error::conversion(format!("decimal scale out of range: {scale}")))?;
        let factor = 10i128
            .checked_pow(exponent)
            .ok_or_else(|| Error::conversion("decimal mantissa overflow"))?;
        let scaled = mantissa
            .checked_mul(factor)
            .ok_or_else(|| Error::conversion("decimal mantissa overflow"))?;
        (scaled, 0u32)
    } else {
        let scale = u32::try_from(scale)
            .map_err(|_| Error::conversion(format!("decimal scale out of range: {scale}")))?;
        (mantissa, scale)
    };

    Decimal::try_from_i128_with_scale(mantissa, scale)
        .map_err(|e| Error::conversion(format!("decimal out of range: {e}")))
}

fn ext_payload(value: &WireValue, expected: i8) -> Result<&[u8]> {
    match value {
        WireValue::Ext(ty, data) if *ty == expected => Ok(data),
        WireValue::Ext(ty, _) => Err(Error::conversion(format!(
            "expected extension type {expected}, got {ty}"
        ))),
        other => Err(Error::conversion(format!(
            "expected an extension value, got {}",
            crate::value::WireKind::of(other)
        ))),
    }
}

/// Read the MessagePack integer that prefixes a decimal payload.
fn read_scale(data: &[u8]) -> Result<(i64, &[u8])> {
    let mut rest = data;
    let scale = rmp::decode::read_int::<i64, _>(&mut rest)
        .map_err(|e| Error::conversion(format!("invalid decimal scale: {e}")))?;
    Ok((scale, rest))
}
