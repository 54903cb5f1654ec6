pub mod block_record;
pub mod challenge_block_info;
pub mod challenge_chain_subslot;
pub mod class_group_element;
pub mod coin;
pub mod foliage;
pub mod foliage_block_data;
pub mod foliage_transaction_block;
pub mod full_block;
pub mod infused_challenge_chain_subslot;
pub mod pool_target;
pub mod proof_of_space;
pub mod reward_chain_block;
pub mod reward_chain_subslot;
pub mod sized_bytes;
pub mod sub_epoch_summary;
pub mod subslot_bundle;
pub mod subslot_proofs;
pub mod transactions_info;
pub mod vdf_info;
pub mod vdf_proof;
