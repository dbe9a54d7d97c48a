/// Builds a `Stack` from a literal sequence, first element at the bottom.
///
/// ```
/// use slot_stack::*;
///
/// let mut st = stack![10, 20, 30];
/// assert_eq!(st.top(), Ok(&30));
/// st.pop().unwrap();
/// st.pop().unwrap();
/// assert_eq!(st.top(), Ok(&10));
///
/// let zeros = stack![0u8; 4];
/// assert_eq!(zeros.len(), 4);
/// ```
#[macro_export]
macro_rules! stack {
    () => {
        $crate::Stack::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::Stack::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::Stack::from([$($x),+])
    };
}
