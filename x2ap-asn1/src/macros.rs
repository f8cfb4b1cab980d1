/// Define an ENUMERATED type holding its root values, with its PER codec.
///
/// Variants are numbered in declaration order, which is the PER index.
/// Extensible types write a zero extension bit and reject a set one.
macro_rules! per_enumerated {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($what:literal, extensible = $ext:literal) {
            $($(#[$vmeta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every root value, in index order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn index(self) -> u32 {
                self as u32
            }

            pub fn from_index(index: u32) -> Option<Self> {
                Self::ALL.get(index as usize).copied()
            }
        }

        impl $crate::per::PerCodec for $name {
            fn pack(&self, encoder: &mut $crate::per::PerEncoder<'_>) -> x2ap_core::X2apResult<()> {
                encoder.write_enumerated(self.index(), Self::ALL.len() as u32, $ext)
            }

            fn unpack(decoder: &mut $crate::per::PerDecoder<'_>) -> x2ap_core::X2apResult<Self> {
                let index = decoder.read_enumerated(Self::ALL.len() as u32, $ext, $what)?;
                Self::from_index(index).ok_or(x2ap_core::X2apError::Decode(
                    x2ap_core::DecodeError::UnknownChoice { what: $what, index },
                ))
            }
        }
    };
}
