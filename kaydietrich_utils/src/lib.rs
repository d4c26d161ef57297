pub trait Apply {
    /// Applies the function `f` only if `value` is `Some(...)` and provides
    /// the contained value to `f`.
    ///
    /// #### Example
    /// ```rust
    /// # use kaydietrich_utils::Apply;
    /// fn shift(base: u32, offset: Option<u32>) -> u32 {
    ///     base.apply_map(offset, |slf, arg| slf + arg)
    /// }
    /// assert_eq!(shift(7, None), 7);
    /// assert_eq!(shift(7, Some(3)), 10);
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        if let Some(value) = value {
            f(self, value)
        } else {
            self
        }
    }
}

impl<T> Apply for T {}

#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables)]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}
