//! Page category constants.
//!
//! Every page declares an HTML `id` in the format `{entity}--{category}`
//! (e.g. `"a001_payable--list"`) and a `data-page-category` with one of the
//! constants below, so the DOM id leads straight to `domain/a001_payable/`.

/// List of records: table with filters and pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Detail view of a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// System page (login, settings).
pub const PAGE_CAT_SYSTEM: &str = "system";
