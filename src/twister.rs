use rand::{Error, RngCore, SeedableRng};

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_B0DF;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7FFF_FFFF;

// 2^-31
const FLOAT_SCALE: f64 = 4.656_612_873_077_392_578_125e-10;

// A 32-bit Mersenne twister.
// Two of these exist during a run: one shuffles unknown cards into the decks,
// the other drives the annealing, so that changing the number of anneal
// restarts never changes which cards get dealt.
#[derive(Clone)]
pub struct Twister {
    table: [u32; N],
    index: usize,
}

impl Twister {
    pub fn new(seed: u32) -> Self {
        let mut twister = Self {
            table: [0; N],
            index: N,
        };
        twister.init(seed);
        twister
    }

    // Resets all state from the seed
    pub fn init(&mut self, seed: u32) {
        self.table[0] = seed;
        for i in 1..N {
            let prev = self.table[i - 1];
            self.table[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        self.generate();
    }

    pub fn next_int(&mut self) -> u32 {
        if self.index >= N {
            self.generate();
        }
        let y = temper(self.table[self.index]);
        self.index += 1;
        y
    }

    // Uniform in [0, max), by masking to the next power of two and rejecting
    pub fn next_below(&mut self, max: u32) -> u32 {
        assert!(max >= 1, "next_below needs a positive bound");
        let mut mask = max - 1;
        mask |= mask >> 1;
        mask |= mask >> 2;
        mask |= mask >> 4;
        mask |= mask >> 8;
        mask |= mask >> 16;
        loop {
            let x = self.next_int() & mask;
            if x < max {
                return x;
            }
        }
    }

    // Index into a collection of the given length
    pub fn next_index(&mut self, len: usize) -> usize {
        self.next_below(len as u32) as usize
    }

    // Uniform in [0, 1). Kept in f64, so near the top of the range it can
    // differ from a 32-bit float version and flip a rare accept decision.
    pub fn next_float(&mut self) -> f64 {
        (self.next_int() & LOWER_MASK) as f64 * FLOAT_SCALE
    }

    fn generate(&mut self) {
        for i in 0..N {
            let next = self.table[(i + 1) % N];
            let y = (self.table[i] & UPPER_MASK) | (next & LOWER_MASK);
            let mag = if next & 1 == 1 { MATRIX_A } else { 0 };
            self.table[i] = self.table[(i + M) % N] ^ (y >> 1) ^ mag;
        }
        self.index = 0;
    }
}

fn temper(mut y: u32) -> u32 {
    y ^= y >> 11;
    y ^= (y << 7) & 0x9D2C_5680;
    y ^= (y << 15) & 0xEFC6_0000;
    y ^ (y >> 18)
}

impl RngCore for Twister {
    fn next_u32(&mut self) -> u32 {
        self.next_int()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.next_int() as u64;
        let hi = self.next_int() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_int().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Twister {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
