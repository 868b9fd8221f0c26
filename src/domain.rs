// Domain types shared by commands and the resolver

pub mod request;
