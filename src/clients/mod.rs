pub mod senscritique_client;
