//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `thiserror` message and a snake-case constructor whose
//! parameters accept anything convertible into the field type.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor and message coverage for generated error enums.
    define_port_error! {
        pub enum GatewayError {
            Unavailable => "gateway unavailable",
            Rejected { status: u16 } => "gateway rejected request: {status}",
            Malformed { message: String } => "gateway payload malformed: {message}",
        }
    }

    #[test]
    fn unit_variants_get_argument_free_constructors() {
        assert_eq!(GatewayError::unavailable(), GatewayError::Unavailable);
        assert_eq!(
            GatewayError::unavailable().to_string(),
            "gateway unavailable"
        );
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        let err = GatewayError::rejected(503_u16);
        assert_eq!(err, GatewayError::Rejected { status: 503 });
        assert_eq!(err.to_string(), "gateway rejected request: 503");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = GatewayError::malformed("missing $items");
        assert_eq!(err.to_string(), "gateway payload malformed: missing $items");
    }
}
