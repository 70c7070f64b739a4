use objc2_core_foundation::{CFArray, CFDictionary, CFNumber, CFRetained, CFString, CFType};
use objc2_core_graphics::{
    CGEventFlags, CGEventSource, CGEventSourceStateID, CGWindowListCopyWindowInfo,
    CGWindowListOption,
};

use crate::config::Modifiers;
use crate::core::WindowInfo;

// kCGNullWindowID
const NULL_WINDOW_ID: u32 = 0;

#[allow(non_snake_case)]
pub(crate) fn kCGWindowLayer() -> CFRetained<CFString> {
    CFString::from_static_str("kCGWindowLayer")
}

#[allow(non_snake_case)]
pub(crate) fn kCGWindowOwnerName() -> CFRetained<CFString> {
    CFString::from_static_str("kCGWindowOwnerName")
}

type WindowDescription = CFDictionary<CFString, CFType>;

/// On-screen windows, front to back. An empty list if the window server doesn't answer.
pub(crate) fn on_screen_windows() -> Vec<WindowInfo> {
    let options =
        CGWindowListOption::OptionOnScreenOnly | CGWindowListOption::ExcludeDesktopElements;
    let Some(list) = (unsafe { CGWindowListCopyWindowInfo(options, NULL_WINDOW_ID) }) else {
        return Vec::new();
    };
    let list: CFRetained<CFArray<WindowDescription>> = unsafe { CFRetained::cast_unchecked(list) };

    let layer_key = kCGWindowLayer();
    let owner_key = kCGWindowOwnerName();
    list.iter()
        .filter_map(|desc| {
            let layer = desc
                .get(&layer_key)
                .and_then(|v| v.downcast_ref::<CFNumber>().and_then(|n| n.as_i64()))?;
            let owner = desc
                .get(&owner_key)
                .and_then(|v| v.downcast_ref::<CFString>().map(|s| s.to_string()))
                .unwrap_or_default();
            Some(WindowInfo { owner, layer })
        })
        .collect()
}

/// Modifier keys held right now, from the combined session state. Doesn't need an event tap.
pub(crate) fn held_modifiers() -> Modifiers {
    let flags = CGEventSource::flags_state(CGEventSourceStateID::CombinedSessionState);

    let mut modifiers = Modifiers::empty();
    if flags.contains(CGEventFlags::MaskCommand) {
        modifiers |= Modifiers::CMD;
    }
    if flags.contains(CGEventFlags::MaskShift) {
        modifiers |= Modifiers::SHIFT;
    }
    if flags.contains(CGEventFlags::MaskAlternate) {
        modifiers |= Modifiers::ALT;
    }
    if flags.contains(CGEventFlags::MaskControl) {
        modifiers |= Modifiers::CTRL;
    }
    modifiers
}
