//! Multiply-accumulate bench.
//!
//! The DUT is a registered MAC: 8-bit operands feed a combinational 16-bit
//! product, and a 16-bit accumulator adds the product on each enabled
//! rising clock edge. The accumulator powers up unknown and clears on
//! synchronous reset. The bench holds reset for two clocks, streams a
//! fixed operand table with enable asserted, idles, then finishes.

use strobe_sim::{BenchModel, Bits, Scope, SignalId, SimContext, SimError};

const SIG_CLK: u32 = 0;
const SIG_RST: u32 = 1;
const SIG_EN: u32 = 2;
const SIG_A: u32 = 3;
const SIG_B: u32 = 4;
const SIG_PRODUCT: u32 = 5;
const SIG_ACC: u32 = 6;

/// Operand pairs streamed by the bench, one per enabled clock.
const OPERANDS: [(u8, u8); 8] = [
    (3, 5),
    (0, 9),
    (12, 12),
    (255, 1),
    (7, 7),
    (128, 2),
    (64, 4),
    (9, 9),
];

/// Clocks held in reset before the operand stream starts.
const RESET_CYCLES: usize = 2;
/// Idle clocks after the stream drains before the bench finishes.
const DRAIN_CYCLES: usize = 2;

/// Registered multiply-accumulate unit.
#[derive(Debug)]
pub struct Mac {
    /// First 8-bit operand.
    pub a: Bits,
    /// Second 8-bit operand.
    pub b: Bits,
    /// Accumulate enable, sampled on the rising clock edge.
    pub en: bool,
    /// Synchronous reset, dominant over enable.
    pub rst: bool,
    product: Bits,
    acc: Bits,
}

impl Mac {
    /// Creates a MAC with zero operands and an unknown accumulator.
    pub fn new() -> Self {
        Self {
            a: Bits::new(8),
            b: Bits::new(8),
            en: false,
            rst: false,
            product: Bits::new(16),
            acc: Bits::all_x(16),
        }
    }

    /// Combinational half: recomputes the product from the operands.
    pub fn eval_comb(&mut self) {
        self.product = self.a.zext(16).wrapping_mul(&self.b.zext(16));
    }

    /// Sequential half: clocks the accumulator on a rising edge.
    ///
    /// Reset dominates enable. An unknown accumulator stays unknown until
    /// reset clears it.
    pub fn clock(&mut self) {
        if self.rst {
            self.acc = Bits::new(16);
        } else if self.en {
            self.acc = self.acc.wrapping_add(&self.product);
        }
    }

    /// The combinational 16-bit product.
    pub fn product(&self) -> &Bits {
        &self.product
    }

    /// The 16-bit accumulator register.
    pub fn acc(&self) -> &Bits {
        &self.acc
    }
}

impl Default for Mac {
    fn default() -> Self {
        Self::new()
    }
}

/// The self-stimulating bench around [`Mac`].
#[derive(Debug)]
pub struct MacTb {
    dut: Mac,
    clk: bool,
    cycle: usize,
}

impl MacTb {
    /// Creates the bench with reset already asserted for the first clock.
    pub fn new() -> Self {
        let mut dut = Mac::new();
        dut.rst = true;
        Self {
            dut,
            clk: false,
            cycle: 0,
        }
    }

    /// The MAC under test.
    pub fn dut(&self) -> &Mac {
        &self.dut
    }

    /// Drives reset, enable, and operands for the next clock cycle.
    fn advance_stimulus(&mut self, ctx: &mut SimContext) {
        let cycle = self.cycle;
        self.cycle += 1;

        if cycle < RESET_CYCLES {
            self.dut.rst = true;
            self.dut.en = false;
        } else if let Some(&(a, b)) = OPERANDS.get(cycle - RESET_CYCLES) {
            self.dut.rst = false;
            self.dut.en = true;
            self.dut.a = Bits::from_u64(u64::from(a), 8);
            self.dut.b = Bits::from_u64(u64::from(b), 8);
        } else if cycle < RESET_CYCLES + OPERANDS.len() + DRAIN_CYCLES {
            self.dut.en = false;
        } else {
            ctx.finish();
        }
    }
}

impl Default for MacTb {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchModel for MacTb {
    fn test_name(&self) -> &str {
        "MAC UNIT TEST"
    }

    fn scope(&self) -> Scope {
        Scope::new("mac_tb")
            .signal(SignalId::from_raw(SIG_CLK), "clk", 1)
            .signal(SignalId::from_raw(SIG_RST), "rst", 1)
            .signal(SignalId::from_raw(SIG_EN), "en", 1)
            .signal(SignalId::from_raw(SIG_A), "a", 8)
            .signal(SignalId::from_raw(SIG_B), "b", 8)
            .child(
                Scope::new("dut")
                    .signal(SignalId::from_raw(SIG_PRODUCT), "product", 16)
                    .signal(SignalId::from_raw(SIG_ACC), "acc", 16),
            )
    }

    fn sample(&self, id: SignalId) -> Bits {
        match id.as_raw() {
            SIG_CLK => Bits::from_bool(self.clk),
            SIG_RST => Bits::from_bool(self.dut.rst),
            SIG_EN => Bits::from_bool(self.dut.en),
            SIG_A => self.dut.a.clone(),
            SIG_B => self.dut.b.clone(),
            SIG_PRODUCT => self.dut.product().clone(),
            SIG_ACC => self.dut.acc().clone(),
            other => panic!("signal {other} not declared by mac bench"),
        }
    }

    fn eval(&mut self, ctx: &mut SimContext) -> Result<(), SimError> {
        // Clock low on even ticks, high on odd ticks.
        let clk = ctx.time().ticks() % 2 == 1;
        let posedge = clk && !self.clk;
        self.clk = clk;

        if posedge {
            // The register samples the drive state of the previous cycle,
            // then the bench drives the next cycle's stimulus.
            self.dut.clock();
            self.advance_stimulus(ctx);
        }

        self.dut.eval_comb();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strobe_sim::{Harness, Logic};

    /// Sum of all streamed products, well below the 16-bit wrap.
    fn expected_total() -> u64 {
        OPERANDS
            .iter()
            .map(|&(a, b)| u64::from(a) * u64::from(b))
            .sum()
    }

    #[test]
    fn mac_accumulator_powers_up_unknown() {
        let dut = Mac::new();
        assert_eq!(dut.acc().to_u64(), None);
        assert_eq!(dut.acc().get(0), Logic::X);
    }

    #[test]
    fn mac_reset_clears_unknown_accumulator() {
        let mut dut = Mac::new();
        dut.rst = true;
        dut.clock();
        assert_eq!(dut.acc().to_u64(), Some(0));
    }

    #[test]
    fn mac_accumulates_products_when_enabled() {
        let mut dut = Mac::new();
        dut.rst = true;
        dut.clock();
        dut.rst = false;
        dut.en = true;

        dut.a = Bits::from_u64(3, 8);
        dut.b = Bits::from_u64(5, 8);
        dut.eval_comb();
        dut.clock();
        assert_eq!(dut.acc().to_u64(), Some(15));

        dut.a = Bits::from_u64(12, 8);
        dut.b = Bits::from_u64(12, 8);
        dut.eval_comb();
        dut.clock();
        assert_eq!(dut.acc().to_u64(), Some(159));
    }

    #[test]
    fn mac_holds_value_when_disabled() {
        let mut dut = Mac::new();
        dut.rst = true;
        dut.clock();
        dut.rst = false;
        dut.en = true;
        dut.a = Bits::from_u64(2, 8);
        dut.b = Bits::from_u64(2, 8);
        dut.eval_comb();
        dut.clock();

        dut.en = false;
        dut.a = Bits::from_u64(99, 8);
        dut.b = Bits::from_u64(99, 8);
        dut.eval_comb();
        dut.clock();
        assert_eq!(dut.acc().to_u64(), Some(4));
    }

    #[test]
    fn mac_unclocked_accumulation_stays_unknown() {
        let mut dut = Mac::new();
        dut.en = true;
        dut.a = Bits::from_u64(1, 8);
        dut.b = Bits::from_u64(1, 8);
        dut.eval_comb();
        dut.clock();
        assert_eq!(dut.acc().to_u64(), None);
    }

    #[test]
    fn bench_finishes_within_bound() {
        let mut harness = Harness::new(MacTb::new());
        let result = harness.run(Some(64)).unwrap();
        assert!(result.finished);
    }

    #[test]
    fn bench_accumulates_whole_stream() {
        let mut harness = Harness::new(MacTb::new());
        let result = harness.run(None).unwrap();
        assert!(result.finished);
        assert_eq!(harness.model().dut().acc().to_u64(), Some(expected_total()));
    }

    #[test]
    fn accumulator_never_wraps_in_this_stream() {
        assert!(expected_total() < u64::from(u16::MAX));
    }

    #[test]
    fn scope_exposes_dut_registers_one_level_down() {
        let scope = MacTb::new().scope();
        assert_eq!(scope.name, "mac_tb");
        assert_eq!(scope.depth(), 2);
        let dut = &scope.children[0];
        assert_eq!(dut.signals[0].name, "product");
        assert_eq!(dut.signals[1].name, "acc");
        assert_eq!(dut.signals[1].width, 16);
    }

    #[test]
    fn banner_name() {
        assert_eq!(MacTb::new().test_name(), "MAC UNIT TEST");
    }
}
