//! 4-bit adder bench with unsigned operand conversion.
//!
//! The DUT reinterprets both 4-bit operands as unsigned and produces a
//! 5-bit sum whose top bit is the carry-out. The bench toggles a clock
//! every tick (one rising edge per two ticks), walks the full 256-vector
//! operand cross-product one vector per clock, then finishes.

use strobe_sim::{BenchModel, Bits, Scope, SignalId, SimContext, SimError};

const SIG_CLK: u32 = 0;
const SIG_A: u32 = 1;
const SIG_B: u32 = 2;
const SIG_SUM: u32 = 3;

/// Number of stimulus vectors: the full 4-bit x 4-bit cross-product.
const VECTOR_COUNT: u16 = 256;

/// Combinational 4-bit adder with unsigned operand conversion.
///
/// Whatever signedness the operands carried upstream, the adder widens
/// them as unsigned before the add, so the 5-bit sum always holds the
/// plain carry-included magnitude.
#[derive(Debug)]
pub struct Adder4 {
    /// First 4-bit operand.
    pub a: Bits,
    /// Second 4-bit operand.
    pub b: Bits,
    sum: Bits,
}

impl Adder4 {
    /// Creates an adder with both operands zero.
    pub fn new() -> Self {
        Self {
            a: Bits::new(4),
            b: Bits::new(4),
            sum: Bits::new(5),
        }
    }

    /// Recomputes the sum from the current operands.
    pub fn eval(&mut self) {
        self.sum = self.a.zext(5).wrapping_add(&self.b.zext(5));
    }

    /// The 5-bit carry-included sum.
    pub fn sum(&self) -> &Bits {
        &self.sum
    }
}

impl Default for Adder4 {
    fn default() -> Self {
        Self::new()
    }
}

/// The self-stimulating bench around [`Adder4`].
#[derive(Debug)]
pub struct Adder4Tb {
    dut: Adder4,
    clk: bool,
    next_vector: u16,
}

impl Adder4Tb {
    /// Creates the bench with the clock low and the vector sweep at zero.
    pub fn new() -> Self {
        Self {
            dut: Adder4::new(),
            clk: false,
            next_vector: 0,
        }
    }

    /// The adder under test.
    pub fn dut(&self) -> &Adder4 {
        &self.dut
    }
}

impl Default for Adder4Tb {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchModel for Adder4Tb {
    fn test_name(&self) -> &str {
        "4 BIT ADDER TEST"
    }

    fn scope(&self) -> Scope {
        Scope::new("adder_4bit_conv_unsign_tb")
            .signal(SignalId::from_raw(SIG_CLK), "clk", 1)
            .signal(SignalId::from_raw(SIG_A), "a", 4)
            .signal(SignalId::from_raw(SIG_B), "b", 4)
            .child(Scope::new("dut").signal(SignalId::from_raw(SIG_SUM), "sum", 5))
    }

    fn sample(&self, id: SignalId) -> Bits {
        match id.as_raw() {
            SIG_CLK => Bits::from_bool(self.clk),
            SIG_A => self.dut.a.clone(),
            SIG_B => self.dut.b.clone(),
            SIG_SUM => self.dut.sum().clone(),
            other => panic!("signal {other} not declared by adder bench"),
        }
    }

    fn eval(&mut self, ctx: &mut SimContext) -> Result<(), SimError> {
        // Clock low on even ticks, high on odd ticks.
        let clk = ctx.time().ticks() % 2 == 1;
        let posedge = clk && !self.clk;
        self.clk = clk;

        if posedge {
            if self.next_vector < VECTOR_COUNT {
                let v = self.next_vector;
                self.dut.a = Bits::from_u64(u64::from(v >> 4), 4);
                self.dut.b = Bits::from_u64(u64::from(v & 0xF), 4);
                self.next_vector += 1;
            } else {
                ctx.finish();
            }
        }

        self.dut.eval();
        Ok(())
    }
}
