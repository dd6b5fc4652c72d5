//! Event capability marker.

use std::any::Any;

/// Marker for types deliverable to a machine as external stimuli.
///
/// Events are plain, immutable data: a zero-sized struct for a bare
/// signal, or a struct carrying stimulus data such as a numeric code.
/// They never reference the machine.
///
/// # Example
///
/// ```rust
/// use shunt::core::Event;
///
/// struct Coin;
/// struct EnterPin {
///     pincode: u32,
/// }
///
/// impl Event for Coin {}
/// impl Event for EnterPin {}
/// ```
pub trait Event: Any {}
