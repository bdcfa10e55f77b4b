//! Recursive-descent decoder for the gccgo type encoding.
//!
//! Every rule reads from a shared [`Reader`] and recurses through [`decode_type`],
//! so nesting depth in the encoding equals recursion depth here, capped at
//! [`MAX_NESTING`]. The decoder decodes the longest valid prefix; callers decide
//! whether leftover bytes matter.
//!
//! ```text
//! E z v b n          singletons (error, string, void, boolean, nil)
//! A elem [len] e     slice / fixed array
//! N len _ name       named type
//! p pointee          pointer
//! C elem [s][r] e    channel
//! M key __ value     map
//! I (name type)* e   interface
//! S (name type [T tag])* [x] e
//! F [m recv]* [p param [V] ... e] [r result ... e] e
//! ```

use crate::types::{ChanDir, FuncType, Member, Singleton, StructField, StructType, TypeExpr};
use tracing::trace;

/// Why a decode failed. `at` is the byte offset into the slice given to [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("premature end of input at byte {at}")]
    PrematureEnd { at: usize },
    #[error("unrecognized tag {} at byte {at}", show_tag(.tag))]
    UnrecognizedTag { tag: u8, at: usize },
    #[error("missing terminator 'e' at byte {at}")]
    MissingTerminator { at: usize },
    #[error("missing delimiter at byte {at}")]
    MissingDelimiter { at: usize },
    #[error("malformed embedded length at byte {at}")]
    LengthParseFailure { at: usize },
    #[error("length mismatch at byte {at}: declared {declared}, only {available} available")]
    LengthMismatch {
        declared: u64,
        available: usize,
        at: usize,
    },
    #[error("nesting deeper than {} at byte {at}", MAX_NESTING)]
    TooDeep { at: usize },
}

/// Deepest type nesting [`decode`] will follow before giving up with
/// [`DecodeError::TooDeep`]. Keeps recursion well inside a 2 MiB thread stack.
pub const MAX_NESTING: usize = 256;

/// Printable ASCII as `'c'`, anything else as hex.
fn show_tag(tag: &u8) -> String {
    if tag.is_ascii_graphic() {
        format!("'{}'", char::from(*tag))
    } else {
        format!("{:#04x}", tag)
    }
}

impl DecodeError {
    pub fn offset(&self) -> usize {
        match *self {
            DecodeError::PrematureEnd { at }
            | DecodeError::UnrecognizedTag { at, .. }
            | DecodeError::MissingTerminator { at }
            | DecodeError::MissingDelimiter { at }
            | DecodeError::LengthParseFailure { at }
            | DecodeError::LengthMismatch { at, .. }
            | DecodeError::TooDeep { at } => at,
        }
    }
}

/// A successful decode: the type and how many input bytes it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub ty: TypeExpr,
    pub consumed: usize,
}

impl Decoded {
    /// Rendered type expression.
    pub fn text(&self) -> String {
        self.ty.to_string()
    }
}

/// Decode the type encoded at the start of `input`.
///
/// On success `consumed` is in `1..=input.len()`. Bytes after `consumed` are not inspected.
pub fn decode(input: &[u8]) -> Result<Decoded, DecodeError> {
    let mut r = Reader::new(input);
    let ty = decode_type(&mut r)?;
    Ok(Decoded {
        ty,
        consumed: r.pos,
    })
}

/// Bounds-checked cursor over the encoded bytes.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader {
            bytes,
            pos: 0,
            depth: 0,
        }
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_terminator(&mut self) -> Result<(), DecodeError> {
        if self.eat(b'e') {
            Ok(())
        } else {
            Err(DecodeError::MissingTerminator { at: self.pos })
        }
    }

    /// Leading digit run; must be followed by at least one non-digit byte.
    fn embedded_length(&mut self) -> Result<u64, DecodeError> {
        let start = self.pos;
        let digits = self.rest().iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return Err(DecodeError::LengthParseFailure { at: start });
        }
        if start + digits == self.bytes.len() {
            return Err(DecodeError::PrematureEnd {
                at: self.bytes.len(),
            });
        }
        let len = std::str::from_utf8(&self.bytes[start..start + digits])
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or(DecodeError::LengthParseFailure { at: start })?;
        self.pos += digits;
        trace!(len, digits, at = start, "embedded length");
        Ok(len)
    }

    /// `<len>_<payload>`, payload exactly `len` bytes.
    fn named_entity(&mut self) -> Result<String, DecodeError> {
        let declared = self.embedded_length()?;
        if !self.eat(b'_') {
            return Err(DecodeError::MissingDelimiter { at: self.pos });
        }
        let available = self.bytes.len() - self.pos;
        let n = usize::try_from(declared)
            .ok()
            .filter(|&n| n <= available)
            .ok_or(DecodeError::LengthMismatch {
                declared,
                available,
                at: self.pos,
            })?;
        let payload = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(String::from_utf8_lossy(payload).into_owned())
    }
}

/// Decode one type at the cursor, one nesting level deeper.
fn decode_type(r: &mut Reader<'_>) -> Result<TypeExpr, DecodeError> {
    if r.depth >= MAX_NESTING {
        return Err(DecodeError::TooDeep { at: r.pos });
    }
    r.depth += 1;
    let ty = decode_tagged(r);
    r.depth -= 1;
    ty
}

/// Dispatch on the tag byte at the cursor.
fn decode_tagged(r: &mut Reader<'_>) -> Result<TypeExpr, DecodeError> {
    let at = r.pos;
    let tag = r.bump().ok_or(DecodeError::PrematureEnd { at })?;
    trace!(tag = %show_tag(&tag), at, depth = r.depth, "dispatch");
    if let Some(s) = Singleton::from_tag(tag) {
        return Ok(TypeExpr::Singleton(s));
    }
    match tag {
        b'A' => decode_array(r),
        b'N' => Ok(TypeExpr::Named(r.named_entity()?)),
        b'p' => Ok(TypeExpr::Pointer(Box::new(decode_type(r)?))),
        b'C' => decode_chan(r),
        b'M' => decode_map(r),
        b'I' => decode_interface(r),
        b'S' => decode_struct(r),
        b'F' => decode_func(r).map(TypeExpr::Func),
        _ => Err(DecodeError::UnrecognizedTag { tag, at }),
    }
}

fn decode_array(r: &mut Reader<'_>) -> Result<TypeExpr, DecodeError> {
    let elem = Box::new(decode_type(r)?);
    match r.peek() {
        None => Err(DecodeError::MissingTerminator { at: r.pos }),
        Some(b'e') => {
            r.pos += 1;
            Ok(TypeExpr::Slice(elem))
        }
        Some(_) => {
            let len = r.embedded_length()?;
            r.expect_terminator()?;
            Ok(TypeExpr::Array(len, elem))
        }
    }
}

fn decode_chan(r: &mut Reader<'_>) -> Result<TypeExpr, DecodeError> {
    let elem = Box::new(decode_type(r)?);
    let send = r.eat(b's');
    let recv = r.eat(b'r');
    r.expect_terminator()?;
    Ok(TypeExpr::Chan(ChanDir::from_flags(send, recv), elem))
}

fn decode_map(r: &mut Reader<'_>) -> Result<TypeExpr, DecodeError> {
    let key = Box::new(decode_type(r)?);
    if !r.rest().starts_with(b"__") {
        return Err(DecodeError::MissingDelimiter { at: r.pos });
    }
    r.pos += 2;
    let value = Box::new(decode_type(r)?);
    Ok(TypeExpr::Map(key, value))
}

fn decode_interface(r: &mut Reader<'_>) -> Result<TypeExpr, DecodeError> {
    let mut methods = Vec::new();
    loop {
        match r.peek() {
            None => return Err(DecodeError::MissingTerminator { at: r.pos }),
            Some(b'e') => {
                r.pos += 1;
                return Ok(TypeExpr::Interface(methods));
            }
            Some(_) => {
                let name = r.named_entity()?;
                let ty = decode_type(r)?;
                methods.push(Member { name, ty });
            }
        }
    }
}

fn decode_struct(r: &mut Reader<'_>) -> Result<TypeExpr, DecodeError> {
    let mut fields = Vec::new();
    let mut incomparable = false;
    loop {
        match r.peek() {
            None => return Err(DecodeError::MissingTerminator { at: r.pos }),
            Some(b'e') => {
                r.pos += 1;
                break;
            }
            Some(b'x') => {
                r.pos += 1;
                r.expect_terminator()?;
                incomparable = true;
                break;
            }
            Some(_) => {
                let name = r.named_entity()?;
                let ty = decode_type(r)?;
                let tag = if r.eat(b'T') {
                    Some(r.named_entity()?)
                } else {
                    None
                };
                fields.push(StructField { name, ty, tag });
            }
        }
    }
    Ok(TypeExpr::Struct(StructType {
        fields,
        incomparable,
    }))
}

/// Types up to the closing `e` of a `p` or `r` clause.
fn decode_list(
    r: &mut Reader<'_>,
    mut after_item: impl FnMut(&mut Reader<'_>),
) -> Result<Vec<TypeExpr>, DecodeError> {
    let mut items = Vec::new();
    loop {
        match r.peek() {
            None => return Err(DecodeError::MissingTerminator { at: r.pos }),
            Some(b'e') => {
                r.pos += 1;
                return Ok(items);
            }
            Some(_) => {
                items.push(decode_type(r)?);
                after_item(r);
            }
        }
    }
}

fn decode_func(r: &mut Reader<'_>) -> Result<FuncType, DecodeError> {
    let mut receiver = None;
    while r.eat(b'm') {
        receiver = Some(Box::new(decode_type(r)?));
    }

    let mut varargs_markers = 0;
    let params = if r.eat(b'p') {
        decode_list(r, |r| {
            if r.eat(b'V') {
                varargs_markers += 1;
            }
        })?
    } else {
        Vec::new()
    };

    let results = if r.eat(b'r') {
        decode_list(r, |_| {})?
    } else {
        Vec::new()
    };

    r.expect_terminator()?;
    Ok(FuncType {
        receiver,
        params,
        varargs_markers,
        results,
    })
}
