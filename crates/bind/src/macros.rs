/// Implements [`Bind`](crate::Bind) for a struct by listing its fields in declaration order.
///
/// Each field may carry annotations in any number of namespaces using the
/// `key[,modifier]` syntax. A field without an annotation in the namespace being
/// scanned, or annotated with `"-"`, is never touched.
///
/// # Example
/// ```
/// use micro_bind::{bind_fields, scan_args, Args};
///
/// #[derive(Debug, Default)]
/// struct Order {
///     symbol: String,
///     tags: Vec<String>,
///     quantity: u32,
///     note: String,
/// }
///
/// bind_fields!(Order {
///     symbol: url = "tradingsymbol", form = "symbol";
///     tags: url = "tag";
///     quantity: url = "qty,omitempty";
///     note;
/// });
///
/// let args = Args::parse("tradingsymbol=INFY&tag=a&tag=b&qty=10&note=x").unwrap();
/// let mut order = Order::default();
/// let matched = scan_args(&args, &mut order, "url").unwrap();
///
/// assert_eq!(matched, ["tradingsymbol", "tag", "qty"]);
/// assert_eq!(order.tags, ["a", "b"]);
/// assert_eq!(order.quantity, 10);
/// assert!(order.note.is_empty());
/// ```
#[macro_export]
macro_rules! bind_fields {
    ($target:ty { $($field:ident $(: $($ns:ident = $tag:literal),+ $(,)?)?);* $(;)? }) => {
        impl $crate::Bind for $target {
            fn fields(&mut self) -> ::std::vec::Vec<$crate::FieldRef<'_>> {
                ::std::vec![
                    $(
                        $crate::FieldRef::new(
                            ::std::stringify!($field),
                            &[$($((::std::stringify!($ns), $tag)),+)?],
                            &mut self.$field,
                        )
                    ),*
                ]
            }
        }
    };
}
