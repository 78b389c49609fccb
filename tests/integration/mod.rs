mod demons;
mod frameset_broadcast;
mod persistence;
