/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! View generation macros.
//!
//! [`view!`](crate::view) declares a message view, its kind marker and its
//! layout from one member list, so getters and required tags cannot drift
//! apart. [`group_view!`](crate::group_view) does the same for one
//! repeating group instance.
//!
//! Members are written `required name: Type = tag` or
//! `optional name: Type = tag`. Required getters return `Result<T>`,
//! optional ones `Result<Option<T>>`.

/// Declares a message view.
///
/// # Example
/// ```
/// use infogate_messages::{MessageKind, view};
/// use rust_decimal::Decimal;
///
/// view! {
///     /// Closing price notice.
///     pub struct ClosePrice<'s> as ClosePriceKind {
///         msg_type: "CP",
///         key: 55,
///         fields {
///             required symbol: &'s str = 55,
///             optional close_price: Decimal = 139,
///         }
///     }
/// }
///
/// assert_eq!(ClosePriceKind::MSG_TYPE, "CP");
/// assert_eq!(ClosePriceKind::definition().required_tags().collect::<Vec<_>>(), vec![55]);
/// ```
#[macro_export]
macro_rules! view {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident<$lt:lifetime> as $kind:ident {
            msg_type: $code:literal,
            key: $key:expr,
            $(extends: $base:ty,)?
            fields {
                $(
                    $(#[$fmeta:meta])*
                    $freq:ident $fname:ident: $fty:ty = $ftag:expr
                ),* $(,)?
            }
            $(
            groups {
                $(
                    $(#[$gmeta:meta])*
                    $greq:ident $gname:ident: $gview:ident = $gtag:expr
                ),* $(,)?
            }
            )?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        $vis struct $name<$lt> {
            scope: $crate::__private::Scope<$lt>,
        }

        #[doc = concat!("Message kind of [`", stringify!($name), "`], tag 35 = `", $code, "`.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $kind {}

        impl<$lt> $name<$lt> {
            $(
                $crate::__view_getter!([$(#[$fmeta])*] $freq $fname: $fty = $ftag);
            )*
            $($(
                $crate::__view_group!([$(#[$gmeta])*] $gname: $gview<$lt> = $gtag);
            )*)?
        }

        impl<$lt> $crate::ScopedView<$lt> for $name<$lt> {
            fn from_scope(scope: $crate::__private::Scope<$lt>) -> Self {
                Self { scope }
            }

            fn scope(&self) -> $crate::__private::Scope<$lt> {
                self.scope
            }
        }

        impl<$lt> $crate::MessageView<$lt> for $name<$lt> {
            const KEY_TAG: u32 = $key;
        }

        impl $crate::MessageKind for $kind {
            const MSG_TYPE: &'static str = $code;
            const NAME: &'static str = stringify!($name);
            type View<'v> = $name<'v>;

            fn definition() -> &'static $crate::__private::MessageDef {
                static DEFINITION: $crate::__private::LazyLock<$crate::__private::MessageDef> =
                    $crate::__private::LazyLock::new(|| {
                        $crate::__private::MessageDef::new($code, stringify!($name))
                            $(.with_field($crate::__view_member!($freq $fname = $ftag)))*
                            $($(.with_group($crate::__view_member!($greq $gname = $gtag)))*)?
                            $(.extend_from(<$base as $crate::MessageKind>::definition()))?
                    });
                &DEFINITION
            }
        }
    };
}

/// Declares the view of one repeating group instance.
///
/// Member required-ness comes from the group definition in the directory;
/// the `required`/`optional` markers only choose the getter shape.
#[macro_export]
macro_rules! group_view {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident<$lt:lifetime> {
            $(
                $(#[$fmeta:meta])*
                $freq:ident $fname:ident: $fty:ty = $ftag:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        $vis struct $name<$lt> {
            scope: $crate::__private::Scope<$lt>,
        }

        impl<$lt> $name<$lt> {
            $(
                $crate::__view_getter!([$(#[$fmeta])*] $freq $fname: $fty = $ftag);
            )*
        }

        impl<$lt> $crate::ScopedView<$lt> for $name<$lt> {
            fn from_scope(scope: $crate::__private::Scope<$lt>) -> Self {
                Self { scope }
            }

            fn scope(&self) -> $crate::__private::Scope<$lt> {
                self.scope
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __view_getter {
    ([$(#[$m:meta])*] required $name:ident: $ty:ty = $tag:expr) => {
        $(#[$m])*
        ///
        /// # Errors
        /// `FieldNotFound` if absent, `IncorrectDataFormat` if malformed.
        pub fn $name(&self) -> ::core::result::Result<$ty, $crate::__private::MessageRejectError> {
            self.scope.require($tag)
        }
    };
    ([$(#[$m:meta])*] optional $name:ident: $ty:ty = $tag:expr) => {
        $(#[$m])*
        ///
        /// # Errors
        /// `IncorrectDataFormat` if present but malformed.
        pub fn $name(
            &self,
        ) -> ::core::result::Result<::core::option::Option<$ty>, $crate::__private::MessageRejectError>
        {
            self.scope.lookup($tag)
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __view_group {
    ([$(#[$m:meta])*] $name:ident: $view:ident<$lt:lifetime> = $tag:expr) => {
        $(#[$m])*
        ///
        /// # Errors
        /// `FieldNotFound` for a missing required count, otherwise the
        /// errors of group extraction.
        pub fn $name(
            &self,
        ) -> ::core::result::Result<::std::vec::Vec<$view<$lt>>, $crate::__private::MessageRejectError>
        {
            Ok(self
                .scope
                .groups($tag)?
                .into_iter()
                .map(|instance| <$view<$lt> as $crate::ScopedView<$lt>>::from_scope(instance.scope()))
                .collect())
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __view_member {
    (required $name:ident = $tag:expr) => {
        $crate::__private::MemberDef::required($tag, stringify!($name))
    };
    (optional $name:ident = $tag:expr) => {
        $crate::__private::MemberDef::optional($tag, stringify!($name))
    };
}
