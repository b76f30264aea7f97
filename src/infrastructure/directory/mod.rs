pub mod moralis;
