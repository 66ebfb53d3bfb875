use bytes::Bytes;

use crate::error::TermDecodeError;
use crate::tag;
use crate::term::Term;

/// Deepest nesting the decoder follows before giving up.
pub const MAX_DEPTH: usize = 512;

type Result<T> = std::result::Result<T, TermDecodeError>;

/// Decode one version-prefixed term occupying the whole buffer.
///
/// Malformed input of any kind is reported as a [`TermDecodeError`]; the
/// decoder never panics and never allocates more than the input can back.
pub fn decode(bytes: &[u8]) -> Result<Term> {
    let (&version, rest) = bytes.split_first().ok_or(TermDecodeError::Empty)?;
    if version != tag::VERSION {
        return Err(TermDecodeError::BadVersion(version));
    }

    let mut input = Input { bytes: rest };
    let term = input.term(0)?;
    if !input.bytes.is_empty() {
        return Err(TermDecodeError::TrailingBytes(input.bytes.len()));
    }
    Ok(term)
}

struct Input<'a> {
    bytes: &'a [u8],
}

impl<'a> Input<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.bytes.len() {
            return Err(TermDecodeError::Truncated {
                needed: n,
                remaining: self.bytes.len(),
            });
        }
        let (head, rest) = self.bytes.split_at(n);
        self.bytes = rest;
        Ok(head)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16> {
        self.array().map(u16::from_be_bytes)
    }

    fn u32(&mut self) -> Result<usize> {
        self.array().map(|b| u32::from_be_bytes(b) as usize)
    }

    fn term(&mut self, depth: usize) -> Result<Term> {
        if depth > MAX_DEPTH {
            return Err(TermDecodeError::DepthExceeded(MAX_DEPTH));
        }

        let tag = self.u8()?;
        match tag {
            tag::SMALL_INTEGER_EXT => Ok(Term::Integer(i64::from(self.u8()?))),
            tag::INTEGER_EXT => Ok(Term::Integer(i64::from(i32::from_be_bytes(self.array()?)))),
            tag::NEW_FLOAT_EXT => Ok(Term::Float(f64::from_be_bytes(self.array()?))),
            tag::FLOAT_EXT => self.legacy_float(),
            tag::ATOM_EXT => {
                let len = usize::from(self.u16()?);
                Ok(Term::Atom(latin1(self.take(len)?)))
            }
            tag::SMALL_ATOM_EXT => {
                let len = usize::from(self.u8()?);
                Ok(Term::Atom(latin1(self.take(len)?)))
            }
            tag::ATOM_UTF8_EXT => {
                let len = usize::from(self.u16()?);
                self.utf8_atom(len)
            }
            tag::SMALL_ATOM_UTF8_EXT => {
                let len = usize::from(self.u8()?);
                self.utf8_atom(len)
            }
            tag::SMALL_TUPLE_EXT => {
                let arity = usize::from(self.u8()?);
                self.sequence(arity, depth).map(Term::Tuple)
            }
            tag::LARGE_TUPLE_EXT => {
                let arity = self.u32()?;
                self.sequence(arity, depth).map(Term::Tuple)
            }
            tag::NIL_EXT => Ok(Term::nil()),
            tag::STRING_EXT => {
                let len = usize::from(self.u16()?);
                Ok(Term::String(self.take(len)?.to_vec()))
            }
            tag::LIST_EXT => {
                let len = self.u32()?;
                let elements = self.sequence(len, depth)?;
                let tail = self.term(depth + 1)?;
                let tail = (!tail.is_nil()).then(|| Box::new(tail));
                Ok(Term::List { elements, tail })
            }
            tag::BINARY_EXT => {
                let len = self.u32()?;
                Ok(Term::Binary(Bytes::copy_from_slice(self.take(len)?)))
            }
            tag::SMALL_BIG_EXT => {
                let n = usize::from(self.u8()?);
                self.big(n)
            }
            tag::LARGE_BIG_EXT => {
                let n = self.u32()?;
                self.big(n)
            }
            other => Err(TermDecodeError::UnknownTag(other)),
        }
    }

    fn sequence(&mut self, len: usize, depth: usize) -> Result<Vec<Term>> {
        // Every element occupies at least one byte.
        let mut elements = Vec::with_capacity(len.min(self.bytes.len()));
        for _ in 0..len {
            elements.push(self.term(depth + 1)?);
        }
        Ok(elements)
    }

    fn utf8_atom(&mut self, len: usize) -> Result<Term> {
        let raw = self.take(len)?;
        let name = std::str::from_utf8(raw).map_err(|_| TermDecodeError::InvalidUtf8)?;
        Ok(Term::Atom(name.to_owned()))
    }

    fn legacy_float(&mut self) -> Result<Term> {
        let raw = self.take(tag::FLOAT_EXT_LEN)?;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        std::str::from_utf8(&raw[..end])
            .ok()
            .and_then(|text| text.trim().parse::<f64>().ok())
            .map(Term::Float)
            .ok_or(TermDecodeError::InvalidFloat)
    }

    fn big(&mut self, n: usize) -> Result<Term> {
        let sign = self.u8()?;
        let digits = self.take(n)?;

        let mut magnitude: u64 = 0;
        for (i, &digit) in digits.iter().enumerate() {
            if i >= 8 {
                if digit != 0 {
                    return Err(TermDecodeError::IntegerOverflow);
                }
                continue;
            }
            magnitude |= u64::from(digit) << (8 * i);
        }

        let value = if sign == 0 {
            i64::try_from(magnitude).map_err(|_| TermDecodeError::IntegerOverflow)?
        } else if magnitude == i64::MIN.unsigned_abs() {
            i64::MIN
        } else {
            -i64::try_from(magnitude).map_err(|_| TermDecodeError::IntegerOverflow)?
        };
        Ok(Term::Integer(value))
    }
}

fn latin1(raw: &[u8]) -> String {
    raw.iter().map(|&b| char::from(b)).collect()
}
