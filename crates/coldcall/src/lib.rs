#![doc = include_str!("../../../README.md")]

mod args;
mod bag;
mod bind;
mod error;
mod function;
mod signature;

pub use crate::{
    args::{BoundArgs, CallArgs},
    bag::Bag,
    bind::{ColdCallable, bind, cold_call},
    error::{CallError, CallResult, SignatureError},
    function::{Callable, Function},
    signature::{Param, ParamKind, Signature},
};
