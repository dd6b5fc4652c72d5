//! Macro generating the closed current-state union.

/// Generate the current-state union for a machine definition.
///
/// Lists the state types a machine may hold (each becomes a variant of
/// the same name) and the context type they operate on. A hidden variant
/// for the reserved [`Transitional`](crate::core::Transitional)
/// placeholder is appended automatically, and the union implements
/// [`StateSet`](crate::core::StateSet) by exhaustive match on the active
/// variant, without boxing or dynamic dispatch.
///
/// `From<StateType>` is implemented for every listed state so an initial
/// state can be written as `Locked.into()`. The variant name
/// `Transitional` is reserved for the placeholder.
///
/// # Example
///
/// ```rust
/// use shunt::state_set;
/// use shunt::core::State;
///
/// #[derive(Default)]
/// pub struct Locked;
/// #[derive(Default)]
/// pub struct Unlocked;
///
/// #[derive(Default)]
/// pub struct Turnstile;
///
/// impl State<Turnstile> for Locked {}
/// impl State<Turnstile> for Unlocked {}
///
/// state_set! {
///     /// Current-state storage for the turnstile.
///     pub enum TurnstileState for Turnstile {
///         Locked,
///         Unlocked,
///     }
/// }
///
/// use shunt::core::StateSet;
/// let state: TurnstileState = Locked.into();
/// assert_eq!(state.key(), shunt::registry::TypeKey::of::<Locked>());
/// ```
#[macro_export]
macro_rules! state_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident for $ctx:ty {
            $( $(#[$variant_meta:meta])* $state:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $state($state),
            )+
            #[doc(hidden)]
            Transitional($crate::core::Transitional),
        }

        impl $crate::core::StateSet<$ctx> for $name {
            fn key(&self) -> $crate::registry::TypeKey {
                match self {
                    $( Self::$state(_) => $crate::registry::TypeKey::of::<$state>(), )+
                    Self::Transitional(_) => {
                        $crate::registry::TypeKey::of::<$crate::core::Transitional>()
                    }
                }
            }

            fn construct(key: $crate::registry::TypeKey) -> ::std::option::Option<Self> {
                $(
                    if key == $crate::registry::TypeKey::of::<$state>() {
                        return ::std::option::Option::Some(Self::$state(
                            <$state as ::std::default::Default>::default(),
                        ));
                    }
                )+
                if key == $crate::registry::TypeKey::of::<$crate::core::Transitional>() {
                    return ::std::option::Option::Some(Self::Transitional(
                        $crate::core::Transitional,
                    ));
                }
                ::std::option::Option::None
            }

            fn transitional() -> Self {
                Self::Transitional($crate::core::Transitional)
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                match self {
                    $( Self::$state(state) => state, )+
                    Self::Transitional(state) => state,
                }
            }

            fn enter(&mut self, trigger: $crate::core::Trigger<'_>, context: &mut $ctx) {
                match self {
                    $(
                        Self::$state(state) => {
                            <$state as $crate::core::State<$ctx>>::on_entry(state, trigger, context)
                        }
                    )+
                    Self::Transitional(state) => {
                        <$crate::core::Transitional as $crate::core::State<$ctx>>::on_entry(
                            state, trigger, context,
                        )
                    }
                }
            }

            fn exit(&mut self, trigger: $crate::core::Trigger<'_>, context: &mut $ctx) {
                match self {
                    $(
                        Self::$state(state) => {
                            <$state as $crate::core::State<$ctx>>::on_exit(state, trigger, context)
                        }
                    )+
                    Self::Transitional(state) => {
                        <$crate::core::Transitional as $crate::core::State<$ctx>>::on_exit(
                            state, trigger, context,
                        )
                    }
                }
            }
        }

        $(
            impl ::std::convert::From<$state> for $name {
                fn from(state: $state) -> Self {
                    Self::$state(state)
                }
            }
        )+
    };
}
