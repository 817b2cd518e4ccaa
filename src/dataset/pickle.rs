//! Minimal pickle reader for numpy array payloads.
//!
//! Only the opcodes that appear in pickled tuples/lists of `numpy.ndarray` objects are
//! understood (protocols 0 to 4, without out-of-band buffers). Arbitrary Python objects are
//! kept as opaque [`Value::Object`] nodes instead of being executed.

use crate::error::IoError;
use ahash::AHashMap;
use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};
use ndarray::{Array2, ArrayD, IxDyn};
use std::cell::RefCell;
use std::io::{BufRead, Read};
use std::rc::Rc;

mod opcode {
    pub const MARK: u8 = b'(';
    pub const STOP: u8 = b'.';
    pub const POP: u8 = b'0';
    pub const POP_MARK: u8 = b'1';
    pub const DUP: u8 = b'2';
    pub const FLOAT: u8 = b'F';
    pub const INT: u8 = b'I';
    pub const BININT: u8 = b'J';
    pub const BININT1: u8 = b'K';
    pub const LONG: u8 = b'L';
    pub const BININT2: u8 = b'M';
    pub const NONE: u8 = b'N';
    pub const REDUCE: u8 = b'R';
    pub const BINSTRING: u8 = b'T';
    pub const SHORT_BINSTRING: u8 = b'U';
    pub const BINUNICODE: u8 = b'X';
    pub const APPEND: u8 = b'a';
    pub const BUILD: u8 = b'b';
    pub const GLOBAL: u8 = b'c';
    pub const DICT: u8 = b'd';
    pub const EMPTY_DICT: u8 = b'}';
    pub const APPENDS: u8 = b'e';
    pub const GET: u8 = b'g';
    pub const BINGET: u8 = b'h';
    pub const LONG_BINGET: u8 = b'j';
    pub const LIST: u8 = b'l';
    pub const EMPTY_LIST: u8 = b']';
    pub const PUT: u8 = b'p';
    pub const BINPUT: u8 = b'q';
    pub const LONG_BINPUT: u8 = b'r';
    pub const SETITEM: u8 = b's';
    pub const TUPLE: u8 = b't';
    pub const EMPTY_TUPLE: u8 = b')';
    pub const SETITEMS: u8 = b'u';
    pub const BINFLOAT: u8 = b'G';
    pub const BINBYTES: u8 = b'B';
    pub const SHORT_BINBYTES: u8 = b'C';
    pub const PROTO: u8 = 0x80;
    pub const NEWOBJ: u8 = 0x81;
    pub const TUPLE1: u8 = 0x85;
    pub const TUPLE2: u8 = 0x86;
    pub const TUPLE3: u8 = 0x87;
    pub const NEWTRUE: u8 = 0x88;
    pub const NEWFALSE: u8 = 0x89;
    pub const LONG1: u8 = 0x8a;
    pub const LONG4: u8 = 0x8b;
    pub const SHORT_BINUNICODE: u8 = 0x8c;
    pub const BINUNICODE8: u8 = 0x8d;
    pub const BINBYTES8: u8 = 0x8e;
    pub const STACK_GLOBAL: u8 = 0x93;
    pub const MEMOIZE: u8 = 0x94;
    pub const FRAME: u8 = 0x95;
}

/// Element type and byte order of a numpy array, e.g. `<f4`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Dtype {
    kind: String,
    little_endian: bool,
}

impl Dtype {
    fn new(kind: &str) -> Self {
        Dtype {
            kind: kind.trim_start_matches(['<', '>', '|', '=']).to_string(),
            little_endian: !kind.starts_with('>'),
        }
    }

    fn item_size(&self) -> Result<usize, IoError> {
        match self.kind.as_str() {
            "f8" | "i8" | "u8" => Ok(8),
            "f4" | "i4" | "u4" => Ok(4),
            "i2" | "u2" => Ok(2),
            "i1" | "u1" | "b1" => Ok(1),
            other => Err(IoError::FormatError(format!(
                "unsupported numpy dtype '{}'",
                other
            ))),
        }
    }
}

/// A reconstructed `numpy.ndarray`, still holding its raw buffer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NdArray {
    shape: Vec<usize>,
    dtype: Dtype,
    fortran_order: bool,
    data: Rc<Vec<u8>>,
}

impl NdArray {
    fn empty() -> Self {
        NdArray {
            shape: vec![0],
            dtype: Dtype::new("f8"),
            fortran_order: false,
            data: Rc::new(Vec::new()),
        }
    }

    pub(crate) fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn decode<B: ByteOrder>(&self) -> Result<Vec<f64>, IoError> {
        let item_size = self.dtype.item_size()?;
        let n_elements: usize = self.shape.iter().product();
        if self.data.len() != n_elements * item_size {
            return Err(IoError::FormatError(format!(
                "array buffer holds {} bytes, shape {:?} of '{}' needs {}",
                self.data.len(),
                self.shape,
                self.dtype.kind,
                n_elements * item_size
            )));
        }

        let values = self.data.chunks_exact(item_size).map(|b| match self.dtype.kind.as_str() {
            "f8" => B::read_f64(b),
            "f4" => B::read_f32(b) as f64,
            "i8" => B::read_i64(b) as f64,
            "i4" => B::read_i32(b) as f64,
            "i2" => B::read_i16(b) as f64,
            "i1" => b[0] as i8 as f64,
            "u8" => B::read_u64(b) as f64,
            "u4" => B::read_u32(b) as f64,
            "u2" => B::read_u16(b) as f64,
            _ => b[0] as f64,
        });

        Ok(values.collect())
    }

    /// Converts the buffer to `f64` values in row-major order.
    pub(crate) fn to_array(&self) -> Result<ArrayD<f64>, IoError> {
        let values = if self.dtype.little_endian {
            self.decode::<LittleEndian>()?
        } else {
            self.decode::<BigEndian>()?
        };

        let shaped = if self.fortran_order {
            let reversed: Vec<usize> = self.shape.iter().rev().cloned().collect();
            ArrayD::from_shape_vec(IxDyn(&reversed), values).map(|a| a.reversed_axes())
        } else {
            ArrayD::from_shape_vec(IxDyn(&self.shape), values)
        };
        let array = shaped.map_err(|e| IoError::FormatError(e.to_string()))?;

        Ok(array.as_standard_layout().into_owned())
    }

    /// Converts a 2D array to an `Array2<f64>`.
    pub(crate) fn to_array2(&self) -> Result<Array2<f64>, IoError> {
        self.to_array()?
            .into_dimensionality::<ndarray::Ix2>()
            .map_err(|_| IoError::FormatError(format!("expected a 2D array, got shape {:?}", self.shape)))
    }

    /// Converts a 1D integer array to labels.
    pub(crate) fn to_labels(&self) -> Result<Vec<i64>, IoError> {
        if self.shape.len() != 1 {
            return Err(IoError::FormatError(format!(
                "expected a 1D label array, got shape {:?}",
                self.shape
            )));
        }
        Ok(self.to_array()?.iter().map(|&v| v as i64).collect())
    }
}

/// A decoded pickle object.
#[derive(Debug, Clone)]
pub(crate) enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Bytes(Rc<Vec<u8>>),
    String(String),
    Tuple(Vec<Value>),
    List(Vec<Value>),
    Dict(Vec<(Value, Value)>),
    Global { module: String, name: String },
    Dtype(Rc<RefCell<Dtype>>),
    Array(Rc<RefCell<NdArray>>),
    Object { callable: Box<Value>, args: Box<Value> },
}

impl Value {
    fn as_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Bytes(b) => Some(b.iter().map(|&c| c as char).collect()),
            _ => None,
        }
    }

    fn as_usize(&self) -> Option<usize> {
        match self {
            Value::Int(i) if *i >= 0 => Some(*i as usize),
            _ => None,
        }
    }

    pub(crate) fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) | Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub(crate) fn as_array(&self) -> Option<NdArray> {
        match self {
            Value::Array(array) => Some(array.borrow().clone()),
            _ => None,
        }
    }
}

fn format_error(msg: impl Into<String>) -> IoError {
    IoError::FormatError(msg.into())
}

struct Machine<R> {
    reader: R,
    stack: Vec<Value>,
    marks: Vec<usize>,
    memo: AHashMap<u32, Value>,
}

impl<R: BufRead> Machine<R> {
    fn pop(&mut self) -> Result<Value, IoError> {
        self.stack
            .pop()
            .ok_or_else(|| format_error("pickle stack underflow"))
    }

    fn top(&self) -> Result<&Value, IoError> {
        self.stack
            .last()
            .ok_or_else(|| format_error("pickle stack is empty"))
    }

    fn pop_mark(&mut self) -> Result<Vec<Value>, IoError> {
        let mark = self
            .marks
            .pop()
            .ok_or_else(|| format_error("pickle MARK missing"))?;
        if mark > self.stack.len() {
            return Err(format_error("pickle MARK points past the stack"));
        }
        Ok(self.stack.split_off(mark))
    }

    fn read_line(&mut self) -> Result<String, IoError> {
        let mut buf = Vec::new();
        self.reader.read_until(b'\n', &mut buf)?;
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        Ok(buf.iter().map(|&c| c as char).collect())
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, IoError> {
        let mut buf = vec![0u8; len];
        self.reader.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_utf8(&mut self, len: usize) -> Result<String, IoError> {
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes).map_err(|e| format_error(e.to_string()))
    }

    fn memo_get(&self, key: u32) -> Result<Value, IoError> {
        self.memo
            .get(&key)
            .cloned()
            .ok_or_else(|| format_error(format!("pickle memo key {} missing", key)))
    }

    fn memo_put(&mut self, key: u32) -> Result<(), IoError> {
        let value = self.top()?.clone();
        self.memo.insert(key, value);
        Ok(())
    }

    fn reduce(&mut self) -> Result<(), IoError> {
        let args = self.pop()?;
        let callable = self.pop()?;
        let value = match &callable {
            Value::Global { module, name }
                if module.ends_with("multiarray") && name == "_reconstruct" =>
            {
                Value::Array(Rc::new(RefCell::new(NdArray::empty())))
            }
            Value::Global { module, name } if module == "numpy" && name == "dtype" => {
                let kind = args
                    .as_tuple()
                    .and_then(|a| a.first())
                    .and_then(Value::as_text)
                    .ok_or_else(|| format_error("numpy.dtype called without a type string"))?;
                Value::Dtype(Rc::new(RefCell::new(Dtype::new(&kind))))
            }
            // bytes pickled by Python 3 for Python 2 readers: _codecs.encode(text, 'latin1')
            Value::Global { module, name } if module == "_codecs" && name == "encode" => {
                let text = args
                    .as_tuple()
                    .and_then(|a| a.first())
                    .and_then(Value::as_text)
                    .ok_or_else(|| format_error("_codecs.encode called without text"))?;
                Value::Bytes(Rc::new(text.chars().map(|c| c as u32 as u8).collect()))
            }
            _ => Value::Object {
                callable: Box::new(callable),
                args: Box::new(args),
            },
        };
        self.stack.push(value);
        Ok(())
    }

    fn build(&mut self) -> Result<(), IoError> {
        let state = self.pop()?;
        match self.top()? {
            Value::Array(array) => {
                let fields = state
                    .as_tuple()
                    .ok_or_else(|| format_error("ndarray state is not a tuple"))?;
                // (version, shape, dtype, is_fortran, data), version is optional
                let fields = match fields.len() {
                    5 => &fields[1..],
                    4 => fields,
                    n => return Err(format_error(format!("ndarray state has {} fields", n))),
                };

                let shape = fields[0]
                    .as_tuple()
                    .ok_or_else(|| format_error("ndarray shape is not a tuple"))?
                    .iter()
                    .map(|d| d.as_usize().ok_or_else(|| format_error("ndarray dimension is not an integer")))
                    .collect::<Result<Vec<usize>, IoError>>()?;
                let dtype = match &fields[1] {
                    Value::Dtype(dtype) => dtype.borrow().clone(),
                    _ => return Err(format_error("ndarray dtype missing")),
                };
                let fortran_order = matches!(fields[2], Value::Bool(true) | Value::Int(1));
                let data = match &fields[3] {
                    Value::Bytes(bytes) => Rc::clone(bytes),
                    Value::String(text) => Rc::new(text.chars().map(|c| c as u32 as u8).collect()),
                    _ => return Err(format_error("ndarray data is not a byte string")),
                };

                let mut array = array.borrow_mut();
                array.shape = shape;
                array.dtype = dtype;
                array.fortran_order = fortran_order;
                array.data = data;
            }
            Value::Dtype(dtype) => {
                // (version, byte order, ...)
                if let Some(order) = state.as_tuple().and_then(|s| s.get(1)).and_then(Value::as_text) {
                    dtype.borrow_mut().little_endian = order != ">";
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn run(&mut self) -> Result<Value, IoError> {
        loop {
            let op = self.reader.read_u8()?;
            match op {
                opcode::PROTO => {
                    let version = self.reader.read_u8()?;
                    if version > 4 {
                        return Err(format_error(format!("pickle protocol {} is not supported", version)));
                    }
                }
                opcode::FRAME => {
                    self.reader.read_u64::<LittleEndian>()?;
                }
                opcode::STOP => return self.pop(),
                opcode::MARK => self.marks.push(self.stack.len()),
                opcode::POP => {
                    self.pop()?;
                }
                opcode::POP_MARK => {
                    self.pop_mark()?;
                }
                opcode::DUP => {
                    let value = self.top()?.clone();
                    self.stack.push(value);
                }

                opcode::NONE => self.stack.push(Value::None),
                opcode::NEWTRUE => self.stack.push(Value::Bool(true)),
                opcode::NEWFALSE => self.stack.push(Value::Bool(false)),
                opcode::BININT => {
                    let v = self.reader.read_i32::<LittleEndian>()?;
                    self.stack.push(Value::Int(v as i64));
                }
                opcode::BININT1 => {
                    let v = self.reader.read_u8()?;
                    self.stack.push(Value::Int(v as i64));
                }
                opcode::BININT2 => {
                    let v = self.reader.read_u16::<LittleEndian>()?;
                    self.stack.push(Value::Int(v as i64));
                }
                opcode::INT => {
                    let line = self.read_line()?;
                    let value = match line.as_str() {
                        "00" => Value::Bool(false),
                        "01" => Value::Bool(true),
                        _ => Value::Int(line.parse().map_err(|_| format_error(format!("bad INT '{}'", line)))?),
                    };
                    self.stack.push(value);
                }
                opcode::LONG => {
                    let line = self.read_line()?;
                    let digits = line.trim_end_matches('L');
                    let v = digits
                        .parse()
                        .map_err(|_| format_error(format!("bad LONG '{}'", line)))?;
                    self.stack.push(Value::Int(v));
                }
                opcode::LONG1 | opcode::LONG4 => {
                    let len = if op == opcode::LONG1 {
                        self.reader.read_u8()? as usize
                    } else {
                        self.reader.read_i32::<LittleEndian>()? as usize
                    };
                    if len > 8 {
                        return Err(format_error(format!("{}-byte integer does not fit i64", len)));
                    }
                    let bytes = self.read_bytes(len)?;
                    let v = if len == 0 {
                        0
                    } else {
                        LittleEndian::read_int(&bytes, len)
                    };
                    self.stack.push(Value::Int(v));
                }
                opcode::FLOAT => {
                    let line = self.read_line()?;
                    let v = line
                        .parse()
                        .map_err(|_| format_error(format!("bad FLOAT '{}'", line)))?;
                    self.stack.push(Value::Float(v));
                }
                opcode::BINFLOAT => {
                    let v = self.reader.read_f64::<BigEndian>()?;
                    self.stack.push(Value::Float(v));
                }

                opcode::BINSTRING => {
                    let len = self.reader.read_i32::<LittleEndian>()?;
                    if len < 0 {
                        return Err(format_error("negative BINSTRING length"));
                    }
                    let bytes = self.read_bytes(len as usize)?;
                    self.stack.push(Value::Bytes(Rc::new(bytes)));
                }
                opcode::SHORT_BINSTRING | opcode::SHORT_BINBYTES => {
                    let len = self.reader.read_u8()? as usize;
                    let bytes = self.read_bytes(len)?;
                    self.stack.push(Value::Bytes(Rc::new(bytes)));
                }
                opcode::BINBYTES => {
                    let len = self.reader.read_u32::<LittleEndian>()? as usize;
                    let bytes = self.read_bytes(len)?;
                    self.stack.push(Value::Bytes(Rc::new(bytes)));
                }
                opcode::BINBYTES8 => {
                    let len = self.reader.read_u64::<LittleEndian>()? as usize;
                    let bytes = self.read_bytes(len)?;
                    self.stack.push(Value::Bytes(Rc::new(bytes)));
                }
                opcode::SHORT_BINUNICODE => {
                    let len = self.reader.read_u8()? as usize;
                    let text = self.read_utf8(len)?;
                    self.stack.push(Value::String(text));
                }
                opcode::BINUNICODE => {
                    let len = self.reader.read_u32::<LittleEndian>()? as usize;
                    let text = self.read_utf8(len)?;
                    self.stack.push(Value::String(text));
                }
                opcode::BINUNICODE8 => {
                    let len = self.reader.read_u64::<LittleEndian>()? as usize;
                    let text = self.read_utf8(len)?;
                    self.stack.push(Value::String(text));
                }

                opcode::EMPTY_TUPLE => self.stack.push(Value::Tuple(Vec::new())),
                opcode::TUPLE => {
                    let items = self.pop_mark()?;
                    self.stack.push(Value::Tuple(items));
                }
                opcode::TUPLE1 | opcode::TUPLE2 | opcode::TUPLE3 => {
                    let n = (op - opcode::TUPLE1 + 1) as usize;
                    if self.stack.len() < n {
                        return Err(format_error("pickle stack underflow building tuple"));
                    }
                    let items = self.stack.split_off(self.stack.len() - n);
                    self.stack.push(Value::Tuple(items));
                }
                opcode::EMPTY_LIST => self.stack.push(Value::List(Vec::new())),
                opcode::LIST => {
                    let items = self.pop_mark()?;
                    self.stack.push(Value::List(items));
                }
                opcode::APPEND => {
                    let item = self.pop()?;
                    match self.stack.last_mut() {
                        Some(Value::List(items)) => items.push(item),
                        _ => return Err(format_error("APPEND target is not a list")),
                    }
                }
                opcode::APPENDS => {
                    let new_items = self.pop_mark()?;
                    match self.stack.last_mut() {
                        Some(Value::List(items)) => items.extend(new_items),
                        _ => return Err(format_error("APPENDS target is not a list")),
                    }
                }
                opcode::EMPTY_DICT => self.stack.push(Value::Dict(Vec::new())),
                opcode::DICT => {
                    let items = self.pop_mark()?;
                    let pairs = pairs_from(items)?;
                    self.stack.push(Value::Dict(pairs));
                }
                opcode::SETITEM => {
                    let value = self.pop()?;
                    let key = self.pop()?;
                    match self.stack.last_mut() {
                        Some(Value::Dict(pairs)) => pairs.push((key, value)),
                        _ => return Err(format_error("SETITEM target is not a dict")),
                    }
                }
                opcode::SETITEMS => {
                    let items = self.pop_mark()?;
                    let new_pairs = pairs_from(items)?;
                    match self.stack.last_mut() {
                        Some(Value::Dict(pairs)) => pairs.extend(new_pairs),
                        _ => return Err(format_error("SETITEMS target is not a dict")),
                    }
                }

                opcode::GLOBAL => {
                    let module = self.read_line()?;
                    let name = self.read_line()?;
                    self.stack.push(Value::Global { module, name });
                }
                opcode::STACK_GLOBAL => {
                    let name = self.pop()?.as_text();
                    let module = self.pop()?.as_text();
                    match (module, name) {
                        (Some(module), Some(name)) => self.stack.push(Value::Global { module, name }),
                        _ => return Err(format_error("STACK_GLOBAL operands are not strings")),
                    }
                }
                opcode::REDUCE | opcode::NEWOBJ => self.reduce()?,
                opcode::BUILD => self.build()?,

                opcode::PUT => {
                    let line = self.read_line()?;
                    let key = line
                        .parse()
                        .map_err(|_| format_error(format!("bad PUT key '{}'", line)))?;
                    self.memo_put(key)?;
                }
                opcode::BINPUT => {
                    let key = self.reader.read_u8()? as u32;
                    self.memo_put(key)?;
                }
                opcode::LONG_BINPUT => {
                    let key = self.reader.read_u32::<LittleEndian>()?;
                    self.memo_put(key)?;
                }
                opcode::MEMOIZE => {
                    let key = self.memo.len() as u32;
                    self.memo_put(key)?;
                }
                opcode::GET => {
                    let line = self.read_line()?;
                    let key = line
                        .parse()
                        .map_err(|_| format_error(format!("bad GET key '{}'", line)))?;
                    let value = self.memo_get(key)?;
                    self.stack.push(value);
                }
                opcode::BINGET => {
                    let key = self.reader.read_u8()? as u32;
                    let value = self.memo_get(key)?;
                    self.stack.push(value);
                }
                opcode::LONG_BINGET => {
                    let key = self.reader.read_u32::<LittleEndian>()?;
                    let value = self.memo_get(key)?;
                    self.stack.push(value);
                }

                other => {
                    return Err(format_error(format!(
                        "unsupported pickle opcode 0x{:02x}",
                        other
                    )));
                }
            }
        }
    }
}

fn pairs_from(items: Vec<Value>) -> Result<Vec<(Value, Value)>, IoError> {
    if items.len() % 2 != 0 {
        return Err(format_error("odd number of dict items"));
    }
    let mut pairs = Vec::with_capacity(items.len() / 2);
    let mut iter = items.into_iter();
    while let (Some(k), Some(v)) = (iter.next(), iter.next()) {
        pairs.push((k, v));
    }
    Ok(pairs)
}

/// Decodes a single pickled object from `reader`.
pub(crate) fn load<R: BufRead>(reader: R) -> Result<Value, IoError> {
    let mut machine = Machine {
        reader,
        stack: Vec::new(),
        marks: Vec::new(),
        memo: AHashMap::new(),
    };
    machine.run()
}
