mod branches;
mod checkout;
mod commit;
mod status;
