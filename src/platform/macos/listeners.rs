use std::ffi::c_void;
use std::sync::mpsc::Sender;

use anyhow::Result;
use objc2_core_graphics::{
    CGDirectDisplayID, CGDisplayChangeSummaryFlags, CGDisplayRegisterReconfigurationCallback,
    CGDisplayRemoveReconfigurationCallback, CGError,
};

use crate::core::{DisplayChange, HubEvent};

struct ListenerCtx {
    hub_sender: Sender<HubEvent>,
}

/// Forwards display reconfiguration callbacks to the hub. The callback is unregistered on drop.
pub(super) struct DisplayListener {
    ctx: Box<ListenerCtx>,
}

impl DisplayListener {
    pub(super) fn new(hub_sender: Sender<HubEvent>) -> Result<Self> {
        let ctx = Box::new(ListenerCtx { hub_sender });
        let err = unsafe {
            CGDisplayRegisterReconfigurationCallback(Some(display_callback), ctx_ptr(&ctx))
        };
        if err != CGError::Success {
            anyhow::bail!("Failed to register display reconfiguration callback (code {})", err.0);
        }
        tracing::info!("Display listener registered");
        Ok(Self { ctx })
    }
}

impl Drop for DisplayListener {
    fn drop(&mut self) {
        let err = unsafe {
            CGDisplayRemoveReconfigurationCallback(Some(display_callback), ctx_ptr(&self.ctx))
        };
        if err != CGError::Success {
            tracing::warn!(code = err.0, "Failed to remove display reconfiguration callback");
        }
    }
}

fn ctx_ptr(ctx: &ListenerCtx) -> *mut c_void {
    ctx as *const ListenerCtx as *mut c_void
}

unsafe extern "C-unwind" fn display_callback(
    display: CGDirectDisplayID,
    flags: CGDisplayChangeSummaryFlags,
    user_info: *mut c_void,
) {
    // The context is boxed and outlives the registration, see DisplayListener::drop
    let ctx: &ListenerCtx = unsafe { &*(user_info as *const ListenerCtx) };
    let change = DisplayChange {
        display,
        begin: flags.contains(CGDisplayChangeSummaryFlags::BeginConfigurationFlag),
    };
    if ctx.hub_sender.send(HubEvent::DisplayChanged(change)).is_err() {
        tracing::debug!(display, "Hub is gone, dropping display change");
    }
}
