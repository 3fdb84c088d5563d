//! Permission adapters.

mod stub_permission_checker;

pub use stub_permission_checker::StubPermissionChecker;
