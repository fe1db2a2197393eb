//! Defines helper macros for generating domain port error enums.
//!
//! Each variant gets a snake_case constructor whose parameters accept
//! anything convertible into the field type, so adapters can write
//! `ResourceRepositoryError::query(err.to_string())` or
//! `ResourceRepositoryError::duplicate_key("name")`.

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
    define_port_error! {
        pub enum StoreError {
            Unavailable => "store unavailable",
            Rejected { field: String } => "rejected {field}",
            Exhausted { limit: u32 } => "exhausted after {limit} attempts",
            Clash { field: String, existing: u32 } => "{field} clashes with #{existing}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StoreError::unavailable(), StoreError::Unavailable);
        assert_eq!(StoreError::unavailable().to_string(), "store unavailable");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = StoreError::rejected("name");
        assert_eq!(err.to_string(), "rejected name");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        assert_eq!(
            StoreError::exhausted(3_u32).to_string(),
            "exhausted after 3 attempts"
        );
        assert_eq!(
            StoreError::clash("email", 7_u32).to_string(),
            "email clashes with #7"
        );
    }
}
