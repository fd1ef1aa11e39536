// Code generated by snippetgen. DO NOT EDIT.

#[allow(non_upper_case_globals)]
pub mod generated {
    use snippetgen::Location;

    pub const Hello: &[u8] = b"print(1)\n";
    pub const HelloLocation: Location = Location {
        file: "a/ex.txt",
        start_line: 3,
        end_line: 5,
    };

    pub const Quote: &[u8] = b"let s = \"it\'s\";\n\tdone\n";
    pub const QuoteLocation: Location = Location {
        file: "src/lib.rs",
        start_line: 10,
        end_line: 13,
    };
}
