pub mod proposta_store;
pub use proposta_store::PropostaStore;
