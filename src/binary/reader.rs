use super::{
    DIGEST_SIZE, HEADER_SIZE, MAGIC, MAX_DEPTH, TAG_BOOL, TAG_FLOAT, TAG_INT, TAG_MAP, TAG_NULL,
    TAG_STRING, VERSION,
};
use crate::error::{Error, Result};
use serde_json::{Map, Number, Value};
use sha2::{Digest, Sha256};

/// Smallest encoded map entry: empty key (4-byte length) plus a NULL tag
const MIN_ENTRY_SIZE: usize = 5;

/// Decode a complete `.cfgx` byte image
///
/// # Errors
///
/// Returns `Error::Format` if the image is truncated, has a bad magic or
/// version, fails its digest check, or contains an invalid value.
pub fn from_bytes(bytes: &[u8]) -> Result<Map<String, Value>> {
    if bytes.len() < HEADER_SIZE + DIGEST_SIZE {
        return Err(Error::Format(format!(
            "truncated: {} bytes is shorter than header and digest",
            bytes.len()
        )));
    }
    if &bytes[..MAGIC.len()] != MAGIC {
        return Err(Error::Format("not a cfgx file (bad magic)".into()));
    }
    let version = bytes[MAGIC.len()];
    if version != VERSION {
        return Err(Error::Format(format!("unsupported version {version}")));
    }

    let (body, digest) = bytes[HEADER_SIZE..].split_at(bytes.len() - HEADER_SIZE - DIGEST_SIZE);
    if Sha256::digest(body).as_slice() != digest {
        return Err(Error::Format(
            "checksum mismatch (truncated or corrupted)".into(),
        ));
    }

    let mut reader = Reader { buf: body, pos: 0 };
    if reader.u8()? != TAG_MAP {
        return Err(Error::Format("root value must be a map".into()));
    }
    let map = reader.map(0)?;

    if reader.remaining() != 0 {
        return Err(Error::Format(format!(
            "{} trailing bytes after root map",
            reader.remaining()
        )));
    }
    Ok(map)
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::Format(format!(
                "unexpected end of data at offset {} (need {n} bytes)",
                self.pos
            )));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn len_prefix(&mut self) -> Result<usize> {
        let len = u32::from_le_bytes(self.array()?) as usize;
        if len > self.remaining() {
            return Err(Error::Format(format!(
                "length {len} at offset {} exceeds remaining data",
                self.pos
            )));
        }
        Ok(len)
    }

    fn string(&mut self) -> Result<String> {
        let len = self.len_prefix()?;
        let offset = self.pos;
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| Error::Format(format!("invalid UTF-8 at offset {offset}: {e}")))
    }

    fn map(&mut self, depth: usize) -> Result<Map<String, Value>> {
        if depth >= MAX_DEPTH {
            return Err(Error::Format(format!(
                "nesting deeper than {MAX_DEPTH} levels"
            )));
        }

        let count = u32::from_le_bytes(self.array()?) as usize;
        if count.saturating_mul(MIN_ENTRY_SIZE) > self.remaining() {
            return Err(Error::Format(format!(
                "map of {count} entries cannot fit in {} remaining bytes",
                self.remaining()
            )));
        }

        let mut map = Map::with_capacity(count);
        for _ in 0..count {
            let key = self.string()?;
            let value = self.value(depth)?;
            if map.insert(key.clone(), value).is_some() {
                return Err(Error::Format(format!("duplicate key '{key}'")));
            }
        }
        Ok(map)
    }

    fn value(&mut self, depth: usize) -> Result<Value> {
        let offset = self.pos;
        match self.u8()? {
            TAG_NULL => Ok(Value::Null),
            TAG_BOOL => match self.u8()? {
                0 => Ok(Value::Bool(false)),
                1 => Ok(Value::Bool(true)),
                other => Err(Error::Format(format!(
                    "invalid boolean byte {other:#04x} at offset {}",
                    offset + 1
                ))),
            },
            TAG_INT => Ok(Value::Number(i64::from_le_bytes(self.array()?).into())),
            TAG_FLOAT => {
                let f = f64::from_le_bytes(self.array()?);
                Number::from_f64(f).map(Value::Number).ok_or_else(|| {
                    Error::Format(format!("non-finite float at offset {offset}"))
                })
            }
            TAG_STRING => self.string().map(Value::String),
            TAG_MAP => self.map(depth + 1).map(Value::Object),
            tag => Err(Error::Format(format!(
                "unknown tag {tag:#04x} at offset {offset}"
            ))),
        }
    }
}
