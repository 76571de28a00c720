//! Runtime syscall handlers.

use crate::interop::context::Context;
use crate::{Error, Result};
use neo_core::crypto_utils::sha256;
use neo_vm::StackItem;
use num_bigint::{BigInt, Sign};

/// Maximum length of a notification event name in bytes.
pub const MAX_EVENT_NAME_LEN: usize = 32;

/// Maximum length of a log message in bytes.
pub const MAX_NOTIFICATION_SIZE: usize = 1024;

/// The implementation of `System.Runtime.Platform`.
pub fn platform(ic: &mut Context) -> Result<()> {
    ic.vm_mut()?
        .push(StackItem::from_byte_string(b"NEO".to_vec()));
    Ok(())
}

/// The implementation of `System.Runtime.GetTrigger`.
pub fn get_trigger(ic: &mut Context) -> Result<()> {
    let trigger = ic.trigger as u8;
    ic.vm_mut()?.push(StackItem::from_int(trigger));
    Ok(())
}

/// The implementation of `System.Runtime.GetTime`: the timestamp of the
/// persisting block.
pub fn get_time(ic: &mut Context) -> Result<()> {
    let timestamp = ic
        .block
        .as_ref()
        .map(|b| b.timestamp)
        .ok_or_else(|| Error::invalid_operation("no block in the context"))?;
    ic.vm_mut()?.push(StackItem::from_int(timestamp));
    Ok(())
}

/// The implementation of `System.Runtime.GetNetwork`.
pub fn get_network(ic: &mut Context) -> Result<()> {
    let network = ic.network;
    ic.vm_mut()?.push(StackItem::from_int(network));
    Ok(())
}

/// The implementation of `System.Runtime.GetRandom`. Deterministic
/// per-context randomness derived from the nonce seed and a running
/// counter, so that every syscall in a script sees a fresh value while
/// all nodes agree on it.
pub fn get_random(ic: &mut Context) -> Result<()> {
    let mut seed = [0u8; 20];
    seed[..16].copy_from_slice(&ic.nonce_data);
    seed[16..].copy_from_slice(&ic.get_random_counter.to_le_bytes());
    ic.get_random_counter += 1;

    let digest = sha256(&seed);
    let value = BigInt::from_bytes_le(Sign::Plus, &digest[..16]);
    ic.vm_mut()?.push(StackItem::Integer(value));
    Ok(())
}

/// The implementation of `System.Runtime.Log`.
pub fn log_message(ic: &mut Context) -> Result<()> {
    let message = ic.vm_mut()?.pop()?.as_string().map_err(Error::from)?;
    if message.len() > MAX_NOTIFICATION_SIZE {
        return Err(Error::invalid_operation(format!(
            "message length shouldn't exceed {MAX_NOTIFICATION_SIZE}"
        )));
    }
    let script_hash = ic.vm()?.current_script_hash();
    log::info!(target: "runtime", "script {script_hash}: {message}");
    Ok(())
}

/// The implementation of `System.Runtime.Notify`.
pub fn notify(ic: &mut Context) -> Result<()> {
    let name = ic.vm_mut()?.pop()?.as_string().map_err(Error::from)?;
    if name.len() > MAX_EVENT_NAME_LEN {
        return Err(Error::invalid_operation(format!(
            "event name must be {MAX_EVENT_NAME_LEN} bytes or less"
        )));
    }
    let state = ic.vm_mut()?.pop()?;
    let items = state.as_array().map_err(Error::from)?;
    let script_hash = ic.vm()?.current_script_hash();
    ic.add_notification(script_hash, name, StackItem::Array(items));
    Ok(())
}

/// The implementation of `System.Runtime.GetInvocationCounter`. The
/// first invocation of a contract within a context counts as one even
/// before the counter map has an entry for it.
pub fn get_invocation_counter(ic: &mut Context) -> Result<()> {
    let hash = ic.vm()?.current_script_hash();
    let count = ic.invocations.get(&hash).copied().unwrap_or(1);
    ic.vm_mut()?.push(StackItem::from_int(count as u64));
    Ok(())
}

/// The implementation of `System.Blockchain.GetHeight`, subject to the
/// persisting-block adjustment of the context.
pub fn blockchain_get_height(ic: &mut Context) -> Result<()> {
    let height = ic.block_height();
    ic.vm_mut()?.push(StackItem::from_int(height));
    Ok(())
}
