/// Asserts at compile time that a GPU-visible struct has the layout the
/// shader expects: every listed field sits on a 16-byte boundary and the
/// total size matches the declared byte count.
#[macro_export]
macro_rules! ensure_aligned {
    ($type:ty { $($field:ident),+ $(,)? }, align <= $size:expr => size) => {
        const _: () = {
            $(
                assert!(
                    ::std::mem::offset_of!($type, $field) % 16 == 0,
                    concat!("field `", stringify!($field), "` of `", stringify!($type), "` is not 16-byte aligned"),
                );
            )+
            assert!(
                ::std::mem::size_of::<$type>() == $size,
                concat!("`", stringify!($type), "` does not have the declared uniform size"),
            );
        };
    };
}
