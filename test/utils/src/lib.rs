pub fn codeblock_fixture() -> &'static str {
    return r#"
Here's a counter in Rust.

```rust
fn count_up(limit: u32) -> Vec<u32> {
    return (0..=limit).collect();
}
```

And the same idea in Javascript.

```javascript
// Collects every number up to the limit into an array, which is a very long winded way of saying this builds a list you can join with newlines and print to the console.
function countUp(limit) {
    let numbers = [];
    for (let i = 0; i <= limit; i++) {
        numbers.push(i);
    }
    return numbers.join('\n');
}
```

This fence has no language tag. Agents drop the tag sometimes, so it still counts as a block.

```
abc123
```

Python too, for good measure.

```python
for i in range(11):
    print(i)
```

That's it!
"#
    .trim();
}

pub fn component_fixture() -> &'static str {
    return r#"
import React, { useState } from 'react';

function Counter() {
    const [count, setCount] = useState(0);
    return (
        <button onClick={() => setCount(count + 1)}>
            Clicked {count} times
        </button>
    );
}

export default Counter;
"#
    .trim();
}
