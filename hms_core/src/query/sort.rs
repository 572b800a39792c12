/// Exchange sort: repeatedly swap adjacent pairs for which `out_of_order`
/// holds, until a full pass makes no swap.
///
/// Quadratic, and stable as long as `out_of_order` is strict.
pub fn exchange_sort<T>(items: &mut [T], out_of_order: impl Fn(&T, &T) -> bool) {
    let len = items.len();
    for pass in 0..len.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..len - 1 - pass {
            if out_of_order(&items[j], &items[j + 1]) {
                items.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}
