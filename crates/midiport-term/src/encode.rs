use bytes::{BufMut, Bytes, BytesMut};

use crate::decode::MAX_DEPTH;
use crate::error::TermEncodeError;
use crate::tag;
use crate::term::Term;

type Result<T> = std::result::Result<T, TermEncodeError>;

/// Encode a term, version marker included.
///
/// `decode(&encode(t)?) == t` for every term this accepts. Nesting follows the
/// decoder's limit: a term deeper than [`MAX_DEPTH`] is rejected here rather
/// than producing bytes `decode` refuses.
pub fn encode(term: &Term) -> Result<Bytes> {
    let mut dst = BytesMut::new();
    encode_into(term, &mut dst)?;
    Ok(dst.freeze())
}

/// Append a version-prefixed encoding of `term` to `dst`.
///
/// On error `dst` may hold a partial encoding.
pub fn encode_into(term: &Term, dst: &mut BytesMut) -> Result<()> {
    dst.put_u8(tag::VERSION);
    put_term(term, dst, 0)
}

fn put_term(term: &Term, dst: &mut BytesMut, depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(TermEncodeError::DepthExceeded(MAX_DEPTH));
    }

    match term {
        Term::Atom(name) => put_atom(name, dst),
        Term::Integer(value) => {
            put_integer(*value, dst);
            Ok(())
        }
        Term::Float(value) => {
            dst.put_u8(tag::NEW_FLOAT_EXT);
            dst.put_f64(*value);
            Ok(())
        }
        Term::Tuple(elements) => {
            if let Ok(arity) = u8::try_from(elements.len()) {
                dst.put_u8(tag::SMALL_TUPLE_EXT);
                dst.put_u8(arity);
            } else {
                dst.put_u8(tag::LARGE_TUPLE_EXT);
                dst.put_u32(wire_len(elements.len())?);
            }
            elements
                .iter()
                .try_for_each(|e| put_term(e, dst, depth + 1))
        }
        Term::List { elements, tail } => {
            if elements.is_empty() && tail.is_none() {
                dst.put_u8(tag::NIL_EXT);
                return Ok(());
            }
            dst.put_u8(tag::LIST_EXT);
            dst.put_u32(wire_len(elements.len())?);
            elements
                .iter()
                .try_for_each(|e| put_term(e, dst, depth + 1))?;
            // The closing `[]` of a proper list sits one level down too.
            match tail {
                Some(tail) => put_term(tail, dst, depth + 1),
                None => put_term(&Term::nil(), dst, depth + 1),
            }
        }
        Term::Binary(bytes) => {
            dst.put_u8(tag::BINARY_EXT);
            dst.put_u32(wire_len(bytes.len())?);
            dst.put_slice(bytes);
            Ok(())
        }
        Term::String(bytes) => {
            let len = u16::try_from(bytes.len())
                .map_err(|_| TermEncodeError::StringTooLong { len: bytes.len() })?;
            dst.put_u8(tag::STRING_EXT);
            dst.put_u16(len);
            dst.put_slice(bytes);
            Ok(())
        }
    }
}

fn put_atom(name: &str, dst: &mut BytesMut) -> Result<()> {
    let chars = name.chars().count();
    if chars > tag::MAX_ATOM_CHARS {
        return Err(TermEncodeError::AtomTooLong { len: chars });
    }
    match u8::try_from(name.len()) {
        Ok(len) => {
            dst.put_u8(tag::SMALL_ATOM_UTF8_EXT);
            dst.put_u8(len);
        }
        Err(_) => {
            // At most 255 chars of at most 4 bytes each.
            dst.put_u8(tag::ATOM_UTF8_EXT);
            dst.put_u16(name.len() as u16);
        }
    }
    dst.put_slice(name.as_bytes());
    Ok(())
}

fn put_integer(value: i64, dst: &mut BytesMut) {
    if let Ok(small) = u8::try_from(value) {
        dst.put_u8(tag::SMALL_INTEGER_EXT);
        dst.put_u8(small);
    } else if let Ok(int) = i32::try_from(value) {
        dst.put_u8(tag::INTEGER_EXT);
        dst.put_i32(int);
    } else {
        let magnitude = value.unsigned_abs().to_le_bytes();
        let digits = 8 - magnitude.iter().rev().take_while(|&&b| b == 0).count();
        dst.put_u8(tag::SMALL_BIG_EXT);
        dst.put_u8(digits as u8);
        dst.put_u8(u8::from(value < 0));
        dst.put_slice(&magnitude[..digits]);
    }
}

fn wire_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| TermEncodeError::SequenceTooLong { len })
}
