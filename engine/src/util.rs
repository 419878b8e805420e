/// Implement another macro for tuples of types recursively.
#[macro_export]
macro_rules! for_every_tuple {
    ($m:ident !! $head_ty:ident) => {
        $m!($head_ty);
    };
    ($m:ident !! $head_ty:ident, $($tail_ty:ident),*) => (
        $m!($head_ty, $( $tail_ty ),*);
        $crate::for_every_tuple!($m !! $( $tail_ty ),*);
    );
}

/// Apply a macro to all tuple combinations from A to P.
///
/// Shallower than a typical 26-letter expansion: views over more than sixteen
/// component types at once are not a realistic query shape for this engine.
#[macro_export]
macro_rules! all_tuples {
    ($m:ident) => {
        $crate::for_every_tuple!($m !! A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P);
    };
}

#[cfg(test)]
mod tests {
    use std::marker::PhantomData;

    struct Data<Params>(PhantomData<Params>);

    macro_rules! test_tuple_macro {
        ($($name: ident),*) => {
            #[allow(dead_code)]
            impl<$($name),*> Data<($($name,)*)> {
                pub fn works(&self) -> bool {
                    true
                }
            }
        }
    }

    all_tuples!(test_tuple_macro);

    #[test]
    fn macro_expands_down_to_a_single_type_tuple() {
        let data = Data::<(i32,)>(PhantomData);
        assert!(data.works());
    }

    #[test]
    fn macro_expands_up_to_the_full_arity() {
        let data = Data::<(
            i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32,
        )>(PhantomData);
        assert!(data.works());
    }
}
