//! Configuration section definitions.
//!
//! Each module corresponds to a section in `subsheet.toml`:
//!
//! | Module   | TOML Section | Purpose                                    |
//! |----------|--------------|--------------------------------------------|
//! | `build`  | `[build]`    | Sass source, images dir, output artifacts  |
//! | `target` | `[target]`   | Published site identity and Data Page name |
//! | `limits` | `[limits]`   | Image and stylesheet constraints           |
//! | `remote` | `[remote]`   | Directory-backed hosting root              |

mod build;
mod limits;
mod remote;
mod target;

pub use build::BuildConfig;
pub use limits::LimitsConfig;
pub use remote::RemoteConfig;
pub use target::TargetConfig;
