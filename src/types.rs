//! Decoded type expressions and their Go-like rendering.

use std::fmt;

/// Fixed one-byte types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Singleton {
    Error,
    String,
    Void,
    Boolean,
    Nil,
}

impl Singleton {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'E' => Some(Singleton::Error),
            b'z' => Some(Singleton::String),
            b'v' => Some(Singleton::Void),
            b'b' => Some(Singleton::Boolean),
            b'n' => Some(Singleton::Nil),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Singleton::Error => "error",
            Singleton::String => "string",
            Singleton::Void => "void",
            Singleton::Boolean => "boolean",
            Singleton::Nil => "nil",
        }
    }
}

/// Channel direction, from the optional `s`/`r` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// Both `s` and `r`.
    Both,
    /// `s` only.
    Send,
    /// `r` only.
    Recv,
    /// Neither flag present.
    Unknown,
}

impl ChanDir {
    pub fn from_flags(send: bool, recv: bool) -> Self {
        match (send, recv) {
            (true, true) => ChanDir::Both,
            (true, false) => ChanDir::Send,
            (false, true) => ChanDir::Recv,
            (false, false) => ChanDir::Unknown,
        }
    }
}

/// A named member of an interface (method) or struct (field).
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub name: String,
    pub ty: TypeExpr,
    /// Struct tag from a `T` clause. Parsed, never rendered.
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub fields: Vec<StructField>,
    /// Field list was closed by `xe`.
    pub incomparable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncType {
    /// Last `m` clause; earlier ones are decoded and dropped.
    pub receiver: Option<Box<TypeExpr>>,
    pub params: Vec<TypeExpr>,
    /// Number of `V` markers seen in the parameter list.
    pub varargs_markers: usize,
    pub results: Vec<TypeExpr>,
}

/// A decoded type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Singleton(Singleton),
    Slice(Box<TypeExpr>),
    Array(u64, Box<TypeExpr>),
    Named(String),
    Pointer(Box<TypeExpr>),
    Chan(ChanDir, Box<TypeExpr>),
    Map(Box<TypeExpr>, Box<TypeExpr>),
    Interface(Vec<Member>),
    Struct(StructType),
    Func(FuncType),
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)
    }
}

impl fmt::Display for StructField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)
    }
}

impl fmt::Display for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("func{")?;
        if let Some(recv) = &self.receiver {
            write!(f, "R({}) ", recv)?;
        }
        f.write_str("(")?;
        write_joined(f, &self.params)?;
        f.write_str(")")?;
        // Suffix appears from the second marker on; a lone `V` renders nothing.
        if self.varargs_markers > 1 {
            f.write_str("...")?;
        }
        match self.results.as_slice() {
            [] => {}
            [only] => write!(f, " {}", only)?,
            many => {
                f.write_str(" (")?;
                write_joined(f, many)?;
                f.write_str(")")?;
            }
        }
        f.write_str("}")
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Singleton(s) => f.write_str(s.as_str()),
            TypeExpr::Slice(elem) => write!(f, "[]{}", elem),
            TypeExpr::Array(len, elem) => write!(f, "[{}]{}", len, elem),
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::Pointer(to) => write!(f, "*{}", to),
            TypeExpr::Chan(dir, elem) => match dir {
                ChanDir::Both => write!(f, "chan{{{}}}", elem),
                ChanDir::Send => write!(f, "chan<-{{{}}}", elem),
                ChanDir::Recv => write!(f, "<-chan{{{}}}", elem),
                ChanDir::Unknown => write!(f, "?chan?{{{}}}", elem),
            },
            TypeExpr::Map(key, value) => write!(f, "map[{}]{}", key, value),
            TypeExpr::Interface(methods) => {
                f.write_str("interface{")?;
                write_joined(f, methods)?;
                f.write_str("}")
            }
            TypeExpr::Struct(st) => {
                f.write_str("struct{")?;
                write_joined(f, &st.fields)?;
                f.write_str("}")
            }
            TypeExpr::Func(func) => write!(f, "{}", func),
        }
    }
}
