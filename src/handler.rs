//! The error catalogue.
//!
//! An [`ErrorHandler`] maps codes to a message and a criticality flag. It
//! can only be obtained through [`HandlerBuilder`], which performs the full
//! initialization, so no operation ever sees an unprepared catalogue.
//!
//! # Lifecycle
//!
//! 1. Build: the catalogue holds exactly the sentinel (0), the default
//!    error (1) and any definitions handed to the builder.
//! 2. Setup: `add`/`remove` adjust the catalogue.
//! 3. Use: `get_error_from_code`, `get_no_error` and `dispatch` only read.
//!    `trigger*` reports errors and may end the process.
//!
//! # Process Exit
//!
//! `trigger*` is the only code path in the crate that calls
//! [`std::process::exit`]. `dispatch` performs the same reporting and
//! returns the code that would halt instead, so callers and tests can run
//! everything up to the exit.
//!
//! # Example
//!
//! ```rust
//! use error_criteria::{ErrorCode, ErrorHandler, HandlerBuilder};
//!
//! const MESH_INVALID: ErrorCode = ErrorCode::const_new(300);
//!
//! let handler = HandlerBuilder::new()
//!     .error(MESH_INVALID, "Mesh contains degenerate cells.", true)
//!     .colors(false)
//!     .build();
//!
//! let err = handler.get_error_from_code(MESH_INVALID);
//! assert_eq!(err.message(), "Mesh contains degenerate cells.");
//!
//! // Nothing is critical here, so this returns normally.
//! handler.trigger_error(&handler.get_no_error());
//! ```

use crate::definitions::{DEFAULT_ERROR, DEFAULT_ERROR_MESSAGE, NO_ERROR, NO_ERROR_MESSAGE};
use crate::logging::{ConsoleSink, OutputStyle, ReportSink, TriggerLog};
use crate::violation::or_fail;
use crate::{ErrorCode, ErrorInstance, RegistryViolation, Result};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

/// A catalogue entry supplied at initialization or via `add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDefinition {
    /// Unique code.
    pub code: ErrorCode,
    /// Message copied into every instance looked up by this code.
    pub message: Cow<'static, str>,
    /// Whether triggering halts the process.
    pub critical: bool,
}

impl ErrorDefinition {
    /// A critical definition.
    pub fn new(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
            critical: true,
        }
    }

    /// A non-critical definition.
    pub fn warning(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
            critical: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CatalogueEntry {
    message: Cow<'static, str>,
    critical: bool,
}

/// Configuration for a new [`ErrorHandler`].
///
/// Defaults: prefixes `"Error:"` / `"Warning:"`, empty suffix, colours on,
/// no extra definitions.
#[derive(Debug, Clone, Default)]
#[must_use = "builders do nothing until built"]
pub struct HandlerBuilder {
    errors: Vec<ErrorDefinition>,
    style: OutputStyle,
}

impl HandlerBuilder {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one extra definition at build time.
    pub fn error(
        mut self,
        code: ErrorCode,
        message: impl Into<Cow<'static, str>>,
        critical: bool,
    ) -> Self {
        self.errors.push(ErrorDefinition {
            code,
            message: message.into(),
            critical,
        });
        self
    }

    /// Register several definitions at build time.
    pub fn errors(mut self, definitions: impl IntoIterator<Item = ErrorDefinition>) -> Self {
        self.errors.extend(definitions);
        self
    }

    /// Prefix printed before critical messages.
    pub fn critical_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.style.critical_prefix = prefix.into();
        self
    }

    /// Prefix printed before warnings.
    pub fn warning_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.style.warning_prefix = prefix.into();
        self
    }

    /// Suffix printed after every message.
    pub fn message_suffix(mut self, suffix: impl Into<Cow<'static, str>>) -> Self {
        self.style.message_suffix = suffix.into();
        self
    }

    /// Enable or disable ANSI colours.
    pub fn colors(mut self, enabled: bool) -> Self {
        self.style.colors = enabled;
        self
    }

    /// Build the handler.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryViolation::DuplicateCode`] if a definition repeats a
    /// code (including the reserved 0 and 1).
    pub fn checked_build(self) -> Result<ErrorHandler> {
        let mut handler = ErrorHandler {
            catalogue: BTreeMap::new(),
            style: self.style,
        };
        handler.checked_reinit(self.errors)?;
        Ok(handler)
    }

    /// Build the handler, halting on a duplicate definition.
    #[track_caller]
    pub fn build(self) -> ErrorHandler {
        or_fail(self.checked_build())
    }
}

/// The catalogue of known errors.
#[derive(Debug, Clone)]
pub struct ErrorHandler {
    catalogue: BTreeMap<ErrorCode, CatalogueEntry>,
    style: OutputStyle,
}

impl ErrorHandler {
    /// Start configuring a handler.
    pub fn builder() -> HandlerBuilder {
        HandlerBuilder::new()
    }

    /// A handler with only the built-in entries and default output style.
    pub fn init() -> Self {
        HandlerBuilder::new().build()
    }

    /// A handler with the built-in entries plus `definitions`.
    #[track_caller]
    pub fn init_with(definitions: impl IntoIterator<Item = ErrorDefinition>) -> Self {
        HandlerBuilder::new().errors(definitions).build()
    }

    /// Reset the catalogue to the built-ins plus `definitions`.
    ///
    /// The output style is kept. On error the catalogue is left as it was.
    pub fn checked_reinit(
        &mut self,
        definitions: impl IntoIterator<Item = ErrorDefinition>,
    ) -> Result<()> {
        let mut catalogue = BTreeMap::new();
        catalogue.insert(
            NO_ERROR,
            CatalogueEntry {
                message: Cow::Borrowed(NO_ERROR_MESSAGE),
                critical: false,
            },
        );
        catalogue.insert(
            DEFAULT_ERROR,
            CatalogueEntry {
                message: Cow::Borrowed(DEFAULT_ERROR_MESSAGE),
                critical: true,
            },
        );
        for definition in definitions {
            if catalogue.contains_key(&definition.code) {
                return Err(RegistryViolation::DuplicateCode {
                    code: definition.code,
                });
            }
            catalogue.insert(
                definition.code,
                CatalogueEntry {
                    message: definition.message,
                    critical: definition.critical,
                },
            );
        }
        self.catalogue = catalogue;
        Ok(())
    }

    /// Reset the catalogue, halting on a duplicate definition.
    #[track_caller]
    pub fn reinit(&mut self, definitions: impl IntoIterator<Item = ErrorDefinition>) {
        or_fail(self.checked_reinit(definitions))
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Register one code.
    ///
    /// # Errors
    ///
    /// [`RegistryViolation::DuplicateCode`] if `code` is already present.
    pub fn checked_add(
        &mut self,
        code: ErrorCode,
        message: impl Into<Cow<'static, str>>,
        critical: bool,
    ) -> Result<()> {
        if self.catalogue.contains_key(&code) {
            return Err(RegistryViolation::DuplicateCode { code });
        }
        self.catalogue.insert(
            code,
            CatalogueEntry {
                message: message.into(),
                critical,
            },
        );
        Ok(())
    }

    /// Register one code, halting if it already exists.
    #[track_caller]
    pub fn add(&mut self, code: ErrorCode, message: impl Into<Cow<'static, str>>, critical: bool) {
        or_fail(self.checked_add(code, message, critical))
    }

    /// Register several definitions atomically: either all are added or,
    /// on the first duplicate (against the catalogue or within the batch),
    /// none are.
    pub fn checked_add_many(&mut self, definitions: &[ErrorDefinition]) -> Result<()> {
        let mut seen = BTreeSet::new();
        for definition in definitions {
            if self.catalogue.contains_key(&definition.code) || !seen.insert(definition.code) {
                return Err(RegistryViolation::DuplicateCode {
                    code: definition.code,
                });
            }
        }
        for definition in definitions {
            self.catalogue.insert(
                definition.code,
                CatalogueEntry {
                    message: definition.message.clone(),
                    critical: definition.critical,
                },
            );
        }
        Ok(())
    }

    /// Register several definitions, halting on any duplicate.
    #[track_caller]
    pub fn add_many(&mut self, definitions: &[ErrorDefinition]) {
        or_fail(self.checked_add_many(definitions))
    }

    /// Register codes given as parallel slices.
    ///
    /// # Errors
    ///
    /// [`RegistryViolation::MismatchedLengths`] if the slices differ in
    /// length, otherwise as [`checked_add_many`](Self::checked_add_many).
    pub fn checked_add_parallel<M: AsRef<str>>(
        &mut self,
        codes: &[ErrorCode],
        messages: &[M],
        critical: &[bool],
    ) -> Result<()> {
        if codes.len() != messages.len() || codes.len() != critical.len() {
            return Err(RegistryViolation::MismatchedLengths {
                codes: codes.len(),
                messages: messages.len(),
                critical: critical.len(),
            });
        }
        let definitions: Vec<ErrorDefinition> = codes
            .iter()
            .zip(messages)
            .zip(critical)
            .map(|((&code, message), &critical)| ErrorDefinition {
                code,
                message: Cow::Owned(message.as_ref().to_owned()),
                critical,
            })
            .collect();
        self.checked_add_many(&definitions)
    }

    /// Register parallel slices, halting on any violation.
    #[track_caller]
    pub fn add_parallel<M: AsRef<str>>(
        &mut self,
        codes: &[ErrorCode],
        messages: &[M],
        critical: &[bool],
    ) {
        or_fail(self.checked_add_parallel(codes, messages, critical))
    }

    /// Remove one code.
    ///
    /// # Errors
    ///
    /// - [`RegistryViolation::ReservedCode`] for codes 0 and 1
    /// - [`RegistryViolation::UnknownCode`] if `code` is not registered
    pub fn checked_remove(&mut self, code: ErrorCode) -> Result<()> {
        Self::ensure_not_reserved(code)?;
        match self.catalogue.remove(&code) {
            Some(_) => Ok(()),
            None => Err(RegistryViolation::UnknownCode { code }),
        }
    }

    /// Remove one code, halting if it is reserved or unknown.
    #[track_caller]
    pub fn remove(&mut self, code: ErrorCode) {
        or_fail(self.checked_remove(code))
    }

    /// Remove several codes atomically.
    pub fn checked_remove_many(&mut self, codes: &[ErrorCode]) -> Result<()> {
        let mut seen = BTreeSet::new();
        for &code in codes {
            Self::ensure_not_reserved(code)?;
            if !self.catalogue.contains_key(&code) || !seen.insert(code) {
                return Err(RegistryViolation::UnknownCode { code });
            }
        }
        for code in codes {
            self.catalogue.remove(code);
        }
        Ok(())
    }

    /// Remove several codes, halting on any violation.
    #[track_caller]
    pub fn remove_many(&mut self, codes: &[ErrorCode]) {
        or_fail(self.checked_remove_many(codes))
    }

    fn ensure_not_reserved(code: ErrorCode) -> Result<()> {
        if code == NO_ERROR || code == DEFAULT_ERROR {
            Err(RegistryViolation::ReservedCode { code })
        } else {
            Ok(())
        }
    }

    /// Detach an entry, returning its message and criticality.
    pub(crate) fn checked_take(&mut self, code: ErrorCode) -> Result<(Cow<'static, str>, bool)> {
        Self::ensure_not_reserved(code)?;
        self.catalogue
            .remove(&code)
            .map(|entry| (entry.message, entry.critical))
            .ok_or(RegistryViolation::UnknownCode { code })
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    /// A fresh instance for `code`, with an empty trace.
    ///
    /// Unknown codes yield the default error (code 1) instead of failing,
    /// so this can be used inside otherwise pure validation code.
    pub fn get_error_from_code(&self, code: ErrorCode) -> ErrorInstance {
        match self.catalogue.get(&code) {
            Some(entry) => {
                ErrorInstance::with_criticality(code, entry.message.clone(), entry.critical)
            }
            None => self.default_error(),
        }
    }

    /// The "no error" sentinel.
    #[inline]
    pub fn get_no_error(&self) -> ErrorInstance {
        ErrorInstance::no_error()
    }

    fn default_error(&self) -> ErrorInstance {
        match self.catalogue.get(&DEFAULT_ERROR) {
            Some(entry) => ErrorInstance::with_criticality(
                DEFAULT_ERROR,
                entry.message.clone(),
                entry.critical,
            ),
            None => ErrorInstance::new(DEFAULT_ERROR, DEFAULT_ERROR_MESSAGE),
        }
    }

    /// Whether `code` is registered.
    #[inline]
    pub fn contains(&self, code: ErrorCode) -> bool {
        self.catalogue.contains_key(&code)
    }

    /// Registered message for `code`.
    pub fn message(&self, code: ErrorCode) -> Option<&str> {
        self.catalogue.get(&code).map(|entry| entry.message.as_ref())
    }

    /// Registered criticality for `code`.
    pub fn is_critical(&self, code: ErrorCode) -> Option<bool> {
        self.catalogue.get(&code).map(|entry| entry.critical)
    }

    /// Registered codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = ErrorCode> + '_ {
        self.catalogue.keys().copied()
    }

    /// Number of registered codes, built-ins included.
    #[inline]
    pub fn len(&self) -> usize {
        self.catalogue.len()
    }

    /// Always false: the built-ins are present from construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.catalogue.is_empty()
    }

    /// Output style used when reporting.
    #[inline]
    pub fn style(&self) -> &OutputStyle {
        &self.style
    }

    // ------------------------------------------------------------------------
    // Reporting
    // ------------------------------------------------------------------------

    /// Report errors in order and find the one that should halt.
    ///
    /// Sentinels are skipped without output. Every other error is reported
    /// to `sink`. Processing stops at the first critical error, whose code
    /// is returned; errors after it are neither reported nor inspected.
    pub fn dispatch<'a, I, S>(&self, errors: I, sink: &mut S) -> Option<ErrorCode>
    where
        I: IntoIterator<Item = &'a ErrorInstance>,
        S: ReportSink + ?Sized,
    {
        for error in errors {
            if error.is_no_error() {
                continue;
            }
            sink.report(&TriggerLog::new(error, &self.style));
            if error.is_critical() {
                return Some(error.code());
            }
        }
        None
    }

    /// Report errors to `sink`, then exit with the code of the first
    /// critical error, if any.
    pub fn trigger_with<'a, I, S>(&self, errors: I, sink: &mut S)
    where
        I: IntoIterator<Item = &'a ErrorInstance>,
        S: ReportSink + ?Sized,
    {
        if let Some(code) = self.dispatch(errors, sink) {
            halt(code);
        }
    }

    /// Report errors to the console, exiting on the first critical one.
    pub fn trigger<'a, I>(&self, errors: I)
    where
        I: IntoIterator<Item = &'a ErrorInstance>,
    {
        self.trigger_with(errors, &mut ConsoleSink)
    }

    /// Trigger a single error.
    pub fn trigger_error(&self, error: &ErrorInstance) {
        self.trigger(std::iter::once(error))
    }

    /// Trigger a slice of errors.
    pub fn trigger_errors(&self, errors: &[ErrorInstance]) {
        self.trigger(errors)
    }

    /// Trigger the catalogue error for `code`.
    pub fn trigger_code(&self, code: ErrorCode) {
        self.trigger_error(&self.get_error_from_code(code))
    }

    /// Trigger the catalogue errors for `codes`, in order.
    pub fn trigger_codes(&self, codes: &[ErrorCode]) {
        let errors: Vec<ErrorInstance> =
            codes.iter().map(|&code| self.get_error_from_code(code)).collect();
        self.trigger(&errors)
    }
}

/// End the process with `code` as its exit status.
fn halt(code: ErrorCode) -> ! {
    std::process::exit(code.exit_status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::ReportSink;

    const MESH_INVALID: ErrorCode = ErrorCode::const_new(300);
    const MESH_COARSE: ErrorCode = ErrorCode::const_new(301);

    fn quiet() -> HandlerBuilder {
        HandlerBuilder::new().colors(false)
    }

    #[derive(Default)]
    struct Recorder(Vec<(ErrorCode, bool, String)>);

    impl ReportSink for Recorder {
        fn report(&mut self, log: &TriggerLog<'_>) {
            self.0.push((log.code(), log.is_critical(), log.render()));
        }
    }

    #[test]
    fn init_holds_exactly_the_builtins() {
        let handler = ErrorHandler::init();
        assert_eq!(handler.codes().collect::<Vec<_>>(), [NO_ERROR, DEFAULT_ERROR]);
        assert_eq!(handler.is_critical(NO_ERROR), Some(false));
        assert_eq!(handler.is_critical(DEFAULT_ERROR), Some(true));
        assert_eq!(handler.message(NO_ERROR), Some(NO_ERROR_MESSAGE));
    }

    #[test]
    fn builder_definitions_are_registered() {
        let handler = quiet()
            .error(MESH_INVALID, "Mesh invalid.", true)
            .errors([ErrorDefinition::warning(MESH_COARSE, "Mesh coarse.")])
            .build();
        assert_eq!(handler.len(), 4);
        assert_eq!(handler.is_critical(MESH_COARSE), Some(false));
    }

    #[test]
    fn builder_rejects_reserved_duplicates() {
        let result = quiet().error(NO_ERROR, "shadow", true).checked_build();
        assert_eq!(
            result.unwrap_err(),
            RegistryViolation::DuplicateCode { code: NO_ERROR }
        );
    }

    #[test]
    fn builder_style_reaches_rendered_reports() {
        let handler = quiet()
            .error(MESH_INVALID, "Mesh invalid.", true)
            .error(MESH_COARSE, "Mesh coarse.", false)
            .critical_prefix("FATAL:")
            .warning_prefix("NOTE:")
            .message_suffix(" [run 7]")
            .build();
        let errors = [
            handler.get_error_from_code(MESH_COARSE),
            handler.get_error_from_code(MESH_INVALID).with_point("refine"),
        ];

        let mut sink = Recorder::default();
        assert_eq!(handler.dispatch(&errors, &mut sink), Some(MESH_INVALID));

        let rendered: Vec<&str> = sink.0.iter().map(|(_, _, text)| text.as_str()).collect();
        assert_eq!(
            rendered,
            [
                "NOTE: Mesh coarse. [run 7]",
                "FATAL: Mesh invalid. [run 7]\n    Trace: refine",
            ]
        );
    }

    #[test]
    fn reinit_is_a_full_reset() {
        let mut handler = quiet().error(MESH_INVALID, "Mesh invalid.", true).build();
        handler.add(MESH_COARSE, "Mesh coarse.", false);
        handler.reinit([ErrorDefinition::new(MESH_COARSE, "Again.")]);
        assert!(!handler.contains(MESH_INVALID));
        assert_eq!(handler.message(MESH_COARSE), Some("Again."));
        assert!(handler.is_critical(MESH_COARSE).unwrap());
        assert!(!handler.style().colors);
    }

    #[test]
    fn failed_reinit_keeps_previous_catalogue() {
        let mut handler = quiet().error(MESH_INVALID, "Mesh invalid.", true).build();
        let result = handler.checked_reinit([
            ErrorDefinition::new(MESH_COARSE, "a"),
            ErrorDefinition::new(MESH_COARSE, "b"),
        ]);
        assert!(result.is_err());
        assert!(handler.contains(MESH_INVALID));
    }

    #[test]
    fn added_codes_round_trip_through_lookup() {
        let mut handler = ErrorHandler::init();
        handler.add(MESH_INVALID, "Mesh invalid.", true);
        handler.add(MESH_COARSE, String::from("Mesh coarse."), false);

        let err = handler.get_error_from_code(MESH_INVALID);
        assert_eq!(err.code(), MESH_INVALID);
        assert_eq!(err.message(), "Mesh invalid.");
        assert!(err.is_critical());
        assert!(err.trace().is_empty());

        let warn = handler.get_error_from_code(MESH_COARSE);
        assert!(!warn.is_critical());
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut handler = ErrorHandler::init();
        handler.add(MESH_INVALID, "first", true);
        assert_eq!(
            handler.checked_add(MESH_INVALID, "second", true),
            Err(RegistryViolation::DuplicateCode { code: MESH_INVALID })
        );
        assert_eq!(handler.message(MESH_INVALID), Some("first"));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_add_fails_loud() {
        let mut handler = ErrorHandler::init();
        handler.add(DEFAULT_ERROR, "shadow", true);
    }

    #[test]
    fn add_many_is_atomic() {
        let mut handler = ErrorHandler::init();
        let batch = [
            ErrorDefinition::new(MESH_INVALID, "a"),
            ErrorDefinition::new(MESH_INVALID, "b"),
        ];
        assert!(handler.checked_add_many(&batch).is_err());
        assert!(!handler.contains(MESH_INVALID));
    }

    #[test]
    fn add_parallel_checks_lengths() {
        let mut handler = ErrorHandler::init();
        let err = handler
            .checked_add_parallel(&[MESH_INVALID, MESH_COARSE], &["a"], &[true, false])
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryViolation::MismatchedLengths { codes: 2, messages: 1, critical: 2 }
        ));

        handler.add_parallel(&[MESH_INVALID, MESH_COARSE], &["a", "b"], &[true, false]);
        assert_eq!(handler.message(MESH_COARSE), Some("b"));
        assert_eq!(handler.is_critical(MESH_COARSE), Some(false));
    }

    #[test]
    fn remove_is_observable() {
        let mut handler = ErrorHandler::init();
        handler.add(MESH_INVALID, "a", true);
        handler.remove(MESH_INVALID);
        assert!(!handler.contains(MESH_INVALID));
        assert_eq!(
            handler.checked_remove(MESH_INVALID),
            Err(RegistryViolation::UnknownCode { code: MESH_INVALID })
        );
    }

    #[test]
    fn reserved_codes_cannot_be_removed() {
        let mut handler = ErrorHandler::init();
        assert_eq!(
            handler.checked_remove(NO_ERROR),
            Err(RegistryViolation::ReservedCode { code: NO_ERROR })
        );
        assert!(handler.checked_remove_many(&[DEFAULT_ERROR]).is_err());
        assert_eq!(handler.len(), 2);
    }

    #[test]
    fn remove_many_is_atomic() {
        let mut handler = ErrorHandler::init();
        handler.add(MESH_INVALID, "a", true);
        assert!(handler.checked_remove_many(&[MESH_INVALID, MESH_COARSE]).is_err());
        assert!(handler.contains(MESH_INVALID));
        handler.add(MESH_COARSE, "b", true);
        handler.remove_many(&[MESH_INVALID, MESH_COARSE]);
        assert_eq!(handler.len(), 2);
    }

    #[test]
    fn unknown_lookup_falls_back_to_default_error() {
        let handler = ErrorHandler::init();
        let err = handler.get_error_from_code(ErrorCode::const_new(4242));
        assert_eq!(err.code(), DEFAULT_ERROR);
        assert_eq!(err.message(), DEFAULT_ERROR_MESSAGE);
        assert!(err.is_critical());
    }

    #[test]
    fn take_detaches_entry() {
        let mut handler = ErrorHandler::init();
        handler.add(MESH_INVALID, "a", false);
        let (message, critical) = handler.checked_take(MESH_INVALID).unwrap();
        assert_eq!(message, "a");
        assert!(!critical);
        assert!(!handler.contains(MESH_INVALID));
        assert!(handler.checked_take(DEFAULT_ERROR).is_err());
    }

    #[test]
    fn dispatch_ignores_sentinel_silently() {
        let handler = quiet().build();
        let mut sink = Recorder::default();
        let halt = handler.dispatch([&handler.get_no_error()], &mut sink);
        assert_eq!(halt, None);
        assert!(sink.0.is_empty());
    }

    #[test]
    fn dispatch_reports_warnings_and_continues() {
        let handler = quiet().error(MESH_COARSE, "Mesh coarse.", false).build();
        let errors = [
            handler.get_error_from_code(MESH_COARSE),
            handler.get_no_error(),
            handler.get_error_from_code(MESH_COARSE),
        ];
        let mut sink = Recorder::default();
        assert_eq!(handler.dispatch(&errors, &mut sink), None);
        assert_eq!(sink.0.len(), 2);
        assert_eq!(sink.0[0].2, "Warning: Mesh coarse.");
    }

    #[test]
    fn dispatch_stops_at_first_critical() {
        let handler = quiet()
            .error(MESH_INVALID, "Mesh invalid.", true)
            .error(MESH_COARSE, "Mesh coarse.", false)
            .build();
        let errors = [
            handler.get_error_from_code(MESH_COARSE),
            handler.get_error_from_code(MESH_INVALID),
            handler.get_error_from_code(MESH_COARSE),
        ];
        let mut sink = Recorder::default();
        assert_eq!(handler.dispatch(&errors, &mut sink), Some(MESH_INVALID));
        assert_eq!(sink.0.len(), 2);
        assert_eq!(sink.0[1], (MESH_INVALID, true, String::from("Error: Mesh invalid.")));
    }

    #[test]
    fn trigger_without_critical_errors_returns() {
        let handler = quiet().error(MESH_COARSE, "Mesh coarse.", false).build();
        let mut sink = String::new();
        handler.trigger_with([&handler.get_error_from_code(MESH_COARSE)], &mut sink);
        handler.trigger_error(&handler.get_no_error());
        handler.trigger_codes(&[NO_ERROR]);
        assert_eq!(sink, "Warning: Mesh coarse.\n");
    }
}
