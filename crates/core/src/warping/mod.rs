pub mod warper;
