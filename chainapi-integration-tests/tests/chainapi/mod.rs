mod account;
mod deploy;
