use std::ops::Add;

/// Accumulator type for a mean reduction.
///
/// The sum is divided by the element count as an `f64` and converted back
/// with [`Mean::from_f64`]. Float types convert exactly. Integer types
/// truncate toward zero, saturating at their bounds (`NaN` becomes zero).
pub trait Mean: Copy + Add<Output = Self> {
    fn as_f64(self) -> f64;
    fn from_f64(val: f64) -> Self;
}

macro_rules! impl_mean {
    ($($ty:ty),*) => {
        $(
            impl Mean for $ty {
                fn as_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(val: f64) -> Self {
                    val as $ty
                }
            }
        )*
    };
}

impl_mean!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Returns `init` unchanged if `vals` is empty.
pub fn calculate_mean<In, Out>(vals: &[In], init: Out) -> Out
where
    In: Copy + Into<Out>,
    Out: Mean,
{
    let n_vals = vals.len();
    if n_vals < 1 {
        return init;
    }

    let mut sum = init;
    for &val in vals {
        sum = sum + val.into();
    }
    Out::from_f64(sum.as_f64() / n_vals as f64)
}

pub fn calculate_mean_iter<'a, I, In, Out>(vals: I, init: Out) -> Out
where
    I: IntoIterator<Item = &'a In>,
    I::IntoIter: ExactSizeIterator,
    In: Copy + Into<Out> + 'a,
    Out: Mean,
{
    let vals = vals.into_iter();
    let n_vals = vals.len();
    if n_vals < 1 {
        return init;
    }

    let sum = vals.fold(init, |sum, &val| sum + val.into());
    Out::from_f64(sum.as_f64() / n_vals as f64)
}
