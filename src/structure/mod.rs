// Tue Jan 20 2026 - Alex

pub mod interface;

pub use interface::{
    interface_name, AssemblerState, ClassHeader, InterfaceAssembler, InterfaceDeclaration, LineOutcome,
};
