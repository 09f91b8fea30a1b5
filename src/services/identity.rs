use serde::Serialize;
use std::fmt;

/// Вариант поставки superwhisper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppVariant {
    Standard,
    /// Версия, установленная через Setapp
    StoreManaged,
}

impl AppVariant {
    /// Порядок проверки: стандартный вариант имеет приоритет
    pub const ALL: [AppVariant; 2] = [AppVariant::Standard, AppVariant::StoreManaged];
}

impl fmt::Display for AppVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppVariant::Standard => f.write_str("standard"),
            AppVariant::StoreManaged => f.write_str("store-managed"),
        }
    }
}

/// Определить активный вариант по результатам проб.
///
/// Вторая проба вызывается только если первая не нашла стандартный вариант.
pub fn resolve_identity<S, M>(probe_standard: S, probe_store_managed: M) -> Option<AppVariant>
where
    S: FnOnce() -> bool,
    M: FnOnce() -> bool,
{
    if probe_standard() {
        Some(AppVariant::Standard)
    } else if probe_store_managed() {
        Some(AppVariant::StoreManaged)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_prefers_standard() {
        let store_probed = Cell::new(false);
        let resolved = resolve_identity(
            || true,
            || {
                store_probed.set(true);
                true
            },
        );
        assert_eq!(resolved, Some(AppVariant::Standard));
        assert!(!store_probed.get());
    }

    #[test]
    fn test_falls_back_to_store_managed() {
        assert_eq!(resolve_identity(|| false, || true), Some(AppVariant::StoreManaged));
    }

    #[test]
    fn test_none_when_both_absent() {
        assert_eq!(resolve_identity(|| false, || false), None);
    }
}
