/// Emits protocol 2 pickles the way numpy does for Python 2 readers.
pub struct PickleWriter {
    bytes: Vec<u8>,
}

impl PickleWriter {
    pub fn new(protocol: u8) -> Self {
        PickleWriter {
            bytes: vec![0x80, protocol],
        }
    }

    pub fn mark(&mut self) -> &mut Self {
        self.bytes.push(b'(');
        self
    }

    pub fn int(&mut self, v: i32) -> &mut Self {
        if (0..=0xff).contains(&v) {
            self.bytes.push(b'K');
            self.bytes.push(v as u8);
        } else if (0..=0xffff).contains(&v) {
            self.bytes.push(b'M');
            self.bytes.extend((v as u16).to_le_bytes());
        } else {
            self.bytes.push(b'J');
            self.bytes.extend(v.to_le_bytes());
        }
        self
    }

    pub fn none(&mut self) -> &mut Self {
        self.bytes.push(b'N');
        self
    }

    pub fn bool(&mut self, v: bool) -> &mut Self {
        self.bytes.push(if v { 0x88 } else { 0x89 });
        self
    }

    pub fn short_str(&mut self, s: &str) -> &mut Self {
        self.bytes.push(b'U');
        self.bytes.push(s.len() as u8);
        self.bytes.extend(s.as_bytes());
        self
    }

    pub fn binstring(&mut self, data: &[u8]) -> &mut Self {
        self.bytes.push(b'T');
        self.bytes.extend((data.len() as i32).to_le_bytes());
        self.bytes.extend(data);
        self
    }

    pub fn tuple(&mut self) -> &mut Self {
        self.bytes.push(b't');
        self
    }

    pub fn tuple1(&mut self) -> &mut Self {
        self.bytes.push(0x85);
        self
    }

    pub fn tuple2(&mut self) -> &mut Self {
        self.bytes.push(0x86);
        self
    }

    pub fn tuple3(&mut self) -> &mut Self {
        self.bytes.push(0x87);
        self
    }

    pub fn binput(&mut self, key: u8) -> &mut Self {
        self.bytes.extend([b'q', key]);
        self
    }

    pub fn binget(&mut self, key: u8) -> &mut Self {
        self.bytes.extend([b'h', key]);
        self
    }

    pub fn global(&mut self, module: &str, name: &str) -> &mut Self {
        self.bytes.push(b'c');
        self.bytes.extend(module.as_bytes());
        self.bytes.push(b'\n');
        self.bytes.extend(name.as_bytes());
        self.bytes.push(b'\n');
        self
    }

    pub fn reduce(&mut self) -> &mut Self {
        self.bytes.push(b'R');
        self
    }

    pub fn build(&mut self) -> &mut Self {
        self.bytes.push(b'b');
        self
    }

    /// `_reconstruct(ndarray, (0,), b'b')` followed by the
    /// `(1, shape, dtype, is_fortran, data)` state.
    pub fn ndarray(
        &mut self,
        shape: &[u32],
        kind: &str,
        byte_order: char,
        fortran_order: bool,
        data: &[u8],
    ) -> &mut Self {
        self.global("numpy.core.multiarray", "_reconstruct")
            .global("numpy", "ndarray")
            .int(0)
            .tuple1()
            .short_str("b")
            .tuple3()
            .reduce();

        self.mark().int(1).mark();
        for &dim in shape {
            self.int(dim as i32);
        }
        self.tuple();

        self.global("numpy", "dtype")
            .short_str(kind)
            .int(0)
            .int(1)
            .tuple3()
            .reduce();
        self.mark()
            .int(3)
            .short_str(&byte_order.to_string())
            .none()
            .none()
            .none()
            .int(-1)
            .int(-1)
            .int(0)
            .tuple()
            .build();

        self.bool(fortran_order).binstring(data).tuple().build()
    }

    pub fn finish(&mut self) -> Vec<u8> {
        self.bytes.push(b'.');
        std::mem::take(&mut self.bytes)
    }
}
