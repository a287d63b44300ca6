use super::{
    DIGEST_SIZE, HEADER_SIZE, MAGIC, MAX_DEPTH, TAG_BOOL, TAG_FLOAT, TAG_INT, TAG_MAP, TAG_NULL,
    TAG_STRING, VERSION,
};
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Encode a mapping into a complete `.cfgx` byte image
///
/// # Errors
///
/// Returns `Error::InvalidFormat` for arrays or integers beyond the signed
/// 64-bit range, and `Error::Format` if nesting or lengths exceed format limits.
pub fn to_bytes(data: &Map<String, Value>) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    write_map(&mut body, data, 0)?;

    let digest = Sha256::digest(&body);

    let mut out = Vec::with_capacity(HEADER_SIZE + body.len() + DIGEST_SIZE);
    out.extend_from_slice(MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&body);
    out.extend_from_slice(&digest);
    Ok(out)
}

fn write_map(out: &mut Vec<u8>, map: &Map<String, Value>, depth: usize) -> Result<()> {
    if depth >= MAX_DEPTH {
        return Err(Error::Format(format!(
            "nesting deeper than {MAX_DEPTH} levels"
        )));
    }

    out.push(TAG_MAP);
    write_len(out, map.len())?;
    for (key, value) in map {
        write_str(out, key)?;
        write_value(out, value, depth + 1)?;
    }
    Ok(())
}

fn write_value(out: &mut Vec<u8>, value: &Value, depth: usize) -> Result<()> {
    match value {
        Value::Null => out.push(TAG_NULL),
        Value::Bool(b) => {
            out.push(TAG_BOOL);
            out.push(u8::from(*b));
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                out.push(TAG_INT);
                out.extend_from_slice(&i.to_le_bytes());
            } else if n.is_u64() {
                return Err(Error::InvalidFormat(format!(
                    "integer {n} exceeds the signed 64-bit range"
                )));
            } else {
                let f = n
                    .as_f64()
                    .ok_or_else(|| Error::InvalidFormat(format!("unrepresentable number {n}")))?;
                out.push(TAG_FLOAT);
                out.extend_from_slice(&f.to_le_bytes());
            }
        }
        Value::String(s) => {
            out.push(TAG_STRING);
            write_str(out, s)?;
        }
        Value::Object(map) => write_map(out, map, depth)?,
        Value::Array(_) => {
            return Err(Error::InvalidFormat(
                "arrays cannot be stored in a config tree".into(),
            ));
        }
    }
    Ok(())
}

fn write_str(out: &mut Vec<u8>, s: &str) -> Result<()> {
    write_len(out, s.len())?;
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

fn write_len(out: &mut Vec<u8>, len: usize) -> Result<()> {
    let len = u32::try_from(len)
        .map_err(|_| Error::Format(format!("length {len} does not fit in 32 bits")))?;
    out.extend_from_slice(&len.to_le_bytes());
    Ok(())
}
