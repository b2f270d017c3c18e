/// Источник случайности для движка.
///
/// Единственное, что движку нужно случайного – место кнопки в первой
/// раздаче. Реализацию выбирает хост; для тестов и реплея есть
/// детерминированный вариант.
pub trait RandomSource {
    /// Случайный индекс в диапазоне `0..bound` (0 при `bound == 0`).
    fn index_below(&mut self, bound: usize) -> usize;
}

//
// NATIVE ВАРИАНТ (НЕ wasm32): обычный rand.
//
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for SystemRng {
    fn index_below(&mut self, bound: usize) -> usize {
        use rand::Rng;

        if bound == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Детерминированный RNG для тестов и воспроизведения сессий:
/// одинаковый seed – одинаковая кнопка.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

#[cfg(not(target_arch = "wasm32"))]
impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;

        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for DeterministicRng {
    fn index_below(&mut self, bound: usize) -> usize {
        use rand::Rng;

        if bound == 0 {
            return 0;
        }
        self.inner.gen_range(0..bound)
    }
}

//
// WASM ВАРИАНТ: без rand / getrandom.
// Кнопка уедет на место 0 – браузерный хост, которому нужна настоящая
// случайность, передаёт собственный RandomSource.
//
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

#[cfg(target_arch = "wasm32")]
impl RandomSource for SystemRng {
    fn index_below(&mut self, _bound: usize) -> usize {
        0
    }
}
