//! Concrete adapters behind the domain ports: processors, notifiers, the
//! simulated gateway and the file transaction log.

pub mod file_log;
pub mod in_memory;
pub mod notifiers;
pub mod processors;
