include!(env!("ASSETS"));
