//! # boundkit-abi
//!
//! `extern "C"` boundary for the boundkit primitives. Symbols are prefixed
//! `bk_`. Failure reporting follows the conventions C callers expect: a
//! sentinel return value (0 or null) paired with errno and a
//! last-failing-function slot readable through [`diag_abi::bk_errfunc`].
//!
//! The safe semantics live in `boundkit-core`; this crate only validates
//! raw pointers, translates sentinels, and hands out `malloc`-backed
//! buffers where C ownership rules require them.

pub mod bits_abi;
pub mod diag_abi;
pub mod input_abi;
pub mod string_abi;
