//! Shared UI primitive library for the desktop shell.
//!
//! The crate owns reusable Leptos primitives, a centralized icon API, and the
//! stable `data-ui-*` DOM contract consumed by the desktop shell CSS layers.
//! Hosted mini-apps and shell surfaces compose these primitives instead of
//! emitting ad hoc chrome markup.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod icon;
mod primitives;

pub use icon::{Icon, IconName, IconSize};
pub use primitives::{
    Button, ButtonVariant, DesktopBackdrop, DesktopIconButton, DesktopIconGrid, DesktopRoot,
    DesktopWindowLayer, DockBar, DockButton, MenuItem, MenuSurface, Modal, NoticeToast,
    ResizeHandle, WindowBody, WindowControlButton, WindowControls, WindowFrame, WindowTitle,
    WindowTitleBar,
};

/// Convenience imports for crates consuming the shared primitive set.
pub mod prelude {
    pub use crate::{
        Button, ButtonVariant, DesktopBackdrop, DesktopIconButton, DesktopIconGrid, DesktopRoot,
        DesktopWindowLayer, DockBar, DockButton, Icon, IconName, IconSize, MenuItem, MenuSurface,
        Modal, NoticeToast, ResizeHandle, WindowBody, WindowControlButton, WindowControls,
        WindowFrame, WindowTitle, WindowTitleBar,
    };
}
