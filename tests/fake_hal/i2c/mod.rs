use embedded_hal::i2c::{self, ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum I2cError {
    /// Nothing answered at the requested address.
    NoAcknowledge,
    /// The bus failed mid-transaction.
    Bus,
}

impl i2c::Error for I2cError {
    fn kind(&self) -> ErrorKind {
        match self {
            I2cError::NoAcknowledge => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            I2cError::Bus => ErrorKind::Bus,
        }
    }
}

/// A fake device with a 256-byte register file behind a single address.
///
/// A write sets the register pointer to its first byte and stores the rest from there on. A read
/// returns bytes starting at the register pointer. Both advance the pointer.
pub struct I2c {
    address: u8,
    registers: [u8; 256],
    pointer: u8,
    writes: Vec<Vec<u8>>,
    reads: Vec<(u8, usize)>,
    transactions: usize,
    fail_after: Option<usize>,
}

impl I2c {
    pub fn new(address: u8) -> I2c {
        I2c {
            address,
            registers: [0; 256],
            pointer: 0,
            writes: Vec::new(),
            reads: Vec::new(),
            transactions: 0,
            fail_after: None,
        }
    }

    pub fn set_registers(&mut self, start: u8, data: &[u8]) {
        let start = start as usize;
        self.registers[start..start + data.len()].copy_from_slice(data);
    }

    pub fn register(&self, register: u8) -> u8 {
        self.registers[register as usize]
    }

    /// Every write made to this device, including the register byte.
    pub fn get_writes(&self) -> &[Vec<u8>] {
        self.writes.as_slice()
    }

    /// Every read made from this device as (start register, length).
    pub fn get_reads(&self) -> &[(u8, usize)] {
        self.reads.as_slice()
    }

    pub fn get_transaction_count(&self) -> usize {
        self.transactions
    }

    /// Fails every transaction after the given number of successful ones.
    pub fn fail_after(&mut self, transactions: usize) {
        self.fail_after = Some(transactions);
    }
}

impl ErrorType for I2c {
    type Error = I2cError;
}

impl i2c::I2c for I2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(I2cError::NoAcknowledge);
        }
        if let Some(limit) = self.fail_after {
            if self.transactions >= limit {
                return Err(I2cError::Bus);
            }
        }
        self.transactions += 1;

        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    if let Some((register, data)) = bytes.split_first() {
                        self.pointer = *register;
                        for value in data {
                            self.registers[self.pointer as usize] = *value;
                            self.pointer = self.pointer.wrapping_add(1);
                        }
                    }
                    self.writes.push(bytes.to_vec());
                }
                Operation::Read(buffer) => {
                    self.reads.push((self.pointer, buffer.len()));
                    for byte in buffer.iter_mut() {
                        *byte = self.registers[self.pointer as usize];
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}
